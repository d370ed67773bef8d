//! Keybind file I/O.
//!
//! One named binding per line, `action:mods:trigger:key`, e.g.
//! `stop:1:press:escape`. Only named bindings are portable; inline
//! callbacks are never written.

use crate::manager::InputManager;
use hearth_common::{KeyCode, Modifiers, Trigger};
use std::path::{Path, PathBuf};

/// Errors from binding operations.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown action identifier: {0:?}")]
    UnknownAction(String),
    #[error("keybind file not found: {0}")]
    MissingFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<C> InputManager<C> {
    /// Write all named bindings to `path`, replacing its contents.
    pub fn save_bindings(&self, path: impl AsRef<Path>) -> Result<(), InputError> {
        let mut out = String::new();
        for (name, bk) in self.named_bindings() {
            out.push_str(&format!(
                "{}:{}:{}:{}\n",
                name,
                bk.mods.bits(),
                bk.trigger,
                bk.key
            ));
        }
        std::fs::write(path.as_ref(), out)?;
        tracing::info!(path = %path.as_ref().display(), "saved key bindings");
        Ok(())
    }

    /// Read bindings from `path` and register them. Malformed lines and
    /// lines naming unregistered actions are logged and skipped; the rest
    /// of the file still loads. Returns the number of bindings applied.
    pub fn load_bindings(&mut self, path: impl AsRef<Path>) -> Result<usize, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::MissingFile(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;

        let mut applied = 0;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok((name, mods, trigger, key)) => {
                    match self.bind_action(key, mods, trigger, &name) {
                        Ok(()) => applied += 1,
                        Err(InputError::UnknownAction(name)) => {
                            tracing::warn!(
                                line = line_no + 1,
                                action = %name,
                                "skipping binding for unregistered action"
                            );
                        }
                        Err(e) => return Err(e),
                    }
                }
                Err(reason) => {
                    tracing::warn!(line = line_no + 1, reason, "skipping malformed binding line");
                }
            }
        }
        tracing::info!(path = %path.display(), applied, "loaded key bindings");
        Ok(applied)
    }
}

fn parse_line(line: &str) -> Result<(String, Modifiers, Trigger, KeyCode), &'static str> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 4 {
        return Err("expected 4 fields");
    }
    let name = parts[0].trim().to_lowercase();
    if name.is_empty() {
        return Err("empty action name");
    }
    let bits: u8 = parts[1].trim().parse().map_err(|_| "bad modifier bits")?;
    let mods = Modifiers::from_bits(bits).map_err(|_| "unknown modifier bits")?;
    let trigger: Trigger = parts[2].parse().map_err(|_| "unknown trigger")?;
    let key: KeyCode = parts[3].parse().map_err(|_| "unknown key")?;
    Ok((name, mods, trigger, key))
}
