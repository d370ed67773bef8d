use crate::persist::InputError;
use hearth_common::{KeyCode, KeyState, Modifiers, Trigger};
use std::collections::HashMap;

/// A callback invoked against the host context when its binding fires.
pub type Callback<C> = Box<dyn FnMut(&mut C)>;

/// The full input condition a binding is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub key: KeyCode,
    pub mods: Modifiers,
    pub trigger: Trigger,
}

/// What a binding invokes when triggered.
enum Slot<C> {
    /// Resolved by name through the action registry at invocation time, so
    /// re-registering an action updates existing bindings.
    Named(String),
    /// Invoked directly.
    Inline(Callback<C>),
}

/// Binding table and named-action registry, generic over the context type
/// handed to callbacks.
///
/// Modifier comparison is exact: a binding registered with `SHIFT` does not
/// fire when the key arrives with no modifiers, and vice versa.
pub struct InputManager<C> {
    actions: HashMap<String, Callback<C>>,
    bindings: HashMap<BindingKey, Slot<C>>,
    /// Hold bindings currently latched by a press edge, keyed by physical
    /// key so the release edge can clear them regardless of modifiers.
    held: HashMap<KeyCode, BindingKey>,
}

impl<C> Default for InputManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InputManager<C> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            bindings: HashMap::new(),
            held: HashMap::new(),
        }
    }

    /// Register (or replace) a named action. Names are trimmed and
    /// lowercased, matching how keybind files refer to them.
    pub fn register_action(&mut self, name: &str, callback: Callback<C>) {
        self.actions.insert(normalize(name), callback);
    }

    /// Whether an action with this name is registered.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(&normalize(name))
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Bind an inline callback. Replaces any binding on the same
    /// `(key, mods, trigger)`.
    pub fn bind(&mut self, key: KeyCode, mods: Modifiers, trigger: Trigger, callback: Callback<C>) {
        let bk = BindingKey { key, mods, trigger };
        if self.bindings.insert(bk, Slot::Inline(callback)).is_some() {
            tracing::debug!(?key, "replaced existing binding");
        }
    }

    /// Bind a named action. The name must already be registered; unknown
    /// identifiers are rejected at bind time.
    pub fn bind_action(
        &mut self,
        key: KeyCode,
        mods: Modifiers,
        trigger: Trigger,
        name: &str,
    ) -> Result<(), InputError> {
        let name = normalize(name);
        if !self.actions.contains_key(&name) {
            return Err(InputError::UnknownAction(name));
        }
        let bk = BindingKey { key, mods, trigger };
        tracing::debug!(action = %name, ?key, "bound action");
        self.bindings.insert(bk, Slot::Named(name));
        Ok(())
    }

    /// Remove one binding, if present.
    pub fn unbind(&mut self, key: KeyCode, mods: Modifiers, trigger: Trigger) {
        let bk = BindingKey { key, mods, trigger };
        self.bindings.remove(&bk);
        if self.held.get(&key) == Some(&bk) {
            self.held.remove(&key);
        }
    }

    /// Clear every binding and any latched hold state. The action registry
    /// is left intact.
    pub fn unbind_all(&mut self) {
        self.bindings.clear();
        self.held.clear();
    }

    /// Whether any binding targets this physical key.
    pub fn is_key_bound(&self, key: KeyCode) -> bool {
        self.bindings.keys().any(|bk| bk.key == key)
    }

    /// Number of registered bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Feed one key transition through the table. Press edges fire `Press`
    /// and `Hold` bindings; release edges clear latched holds and fire
    /// `Release` bindings.
    pub fn dispatch_key(&mut self, key: KeyCode, state: KeyState, mods: Modifiers, ctx: &mut C) {
        match state {
            KeyState::Pressed => {
                self.run_binding(
                    BindingKey {
                        key,
                        mods,
                        trigger: Trigger::Press,
                    },
                    ctx,
                );
                let hold = BindingKey {
                    key,
                    mods,
                    trigger: Trigger::Hold,
                };
                if self.bindings.contains_key(&hold) {
                    self.held.insert(key, hold);
                    self.run_binding(hold, ctx);
                }
            }
            KeyState::Released => {
                self.held.remove(&key);
                self.run_binding(
                    BindingKey {
                        key,
                        mods,
                        trigger: Trigger::Release,
                    },
                    ctx,
                );
            }
        }
    }

    /// Fire every latched hold binding once. Called by the host at its
    /// held-input cadence.
    pub fn run_held(&mut self, ctx: &mut C) {
        let latched: Vec<BindingKey> = self.held.values().copied().collect();
        for bk in latched {
            self.run_binding(bk, ctx);
        }
    }

    fn run_binding(&mut self, bk: BindingKey, ctx: &mut C) {
        let name = match self.bindings.get_mut(&bk) {
            None => return,
            Some(Slot::Inline(callback)) => {
                callback(ctx);
                return;
            }
            Some(Slot::Named(name)) => name.clone(),
        };
        match self.actions.get_mut(&name) {
            Some(callback) => callback(ctx),
            // Possible when an action was registered, bound, then the
            // registry entry replaced the whole manager state externally.
            None => tracing::warn!(action = %name, "bound action no longer registered"),
        }
    }

    /// Named bindings as `(name, key, mods, trigger)` tuples, sorted for
    /// stable output. Inline bindings have no portable form and are skipped.
    pub fn named_bindings(&self) -> Vec<(String, BindingKey)> {
        let mut out: Vec<(String, BindingKey)> = self
            .bindings
            .iter()
            .filter_map(|(bk, slot)| match slot {
                Slot::Named(name) => Some((name.clone(), *bk)),
                Slot::Inline(_) => None,
            })
            .collect();
        out.sort_by(|a, b| (&a.0, a.1.key, a.1.mods.bits()).cmp(&(&b.0, b.1.key, b.1.mods.bits())));
        out
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
