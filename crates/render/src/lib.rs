//! Renderables and the renderer-agnostic frame interface.
//!
//! Plugins append [`Renderable`]s to a [`RenderList`] at window-open time,
//! mutate their transforms each tick, and emit draw calls into a [`Frame`]
//! in their render hook. A backend consumes the frame through the
//! [`Renderer`] trait; this crate ships only a debug text backend, real
//! GPU output is an external collaborator.

pub mod frame;
pub mod list;

pub use frame::{DebugTextRenderer, DrawCall, Frame, Renderer};
pub use list::{RenderList, Renderable, RenderableId};
