//! The plugin lifecycle host.
//!
//! A [`Game`] owns the shared context ([`Ctx`]), the input binding table,
//! the tick scheduler, and an ordered list of [`EventHandler`]s. Plugins
//! implement the handler trait and are dispatched in registration order
//! through a fixed hook sequence:
//!
//! `on_game_open` → `on_window_open` → (tick batch, `render`)* →
//! `on_game_close`, with `on_resolution_change` and `on_plugin_load`
//! interleaved as their events arrive.
//!
//! Windowing and presentation sit behind the [`Platform`] trait; the
//! bundled [`HeadlessPlatform`] drives the loop without a window for
//! tests and tooling.

pub mod config;
pub mod ctx;
pub mod defaults;
pub mod error;
pub mod event;
pub mod game;
pub mod platform;
pub mod schedule;

pub use config::GameConfig;
// Plugins take a frame in their render hook; re-export so implementing
// the handler trait needs only this crate.
pub use hearth_render::Frame;
pub use ctx::{Ctx, CursorState, HostCtx, WindowInfo};
pub use error::HostError;
pub use event::{EventHandler, PluginInfo};
pub use game::Game;
pub use platform::{HeadlessPlatform, Platform, PlatformEvent, SurfaceInfo};
pub use schedule::{Scheduler, Task};
