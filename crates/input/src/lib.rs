//! Input bindings: physical key conditions mapped to actions.
//!
//! # Invariants
//! - A binding key is `(key, modifiers, trigger)`; rebinding the same key
//!   replaces the previous binding (last registration wins).
//! - Named identifiers resolve against the action registry at bind time;
//!   unknown names are an error, never a silent no-op.
//! - Dispatch runs callbacks synchronously in the caller's polling phase.

pub mod manager;
pub mod persist;

pub use manager::{BindingKey, Callback, InputManager};
pub use persist::InputError;
