//! Shared identifier types used across the hearth host and its plugins.
//!
//! # Invariants
//! - `KeyCode` is a closed enumeration: the host never invents key values
//!   outside this set, and bindings can only target members of it.
//! - `Display`/`FromStr` for keys and triggers round-trip, so keybind files
//!   written by one host version parse in another.

pub mod key;
pub mod types;

pub use key::{KeyCode, KeyState, Modifiers, Trigger};
pub use types::{ParseIdError, RenderMode};
