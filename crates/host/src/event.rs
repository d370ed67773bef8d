use crate::ctx::HostCtx;
use hearth_render::Frame;
use std::path::PathBuf;

/// Identity of a plugin or script announced through `on_plugin_load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    /// Source file for script-backed plugins; `None` for compiled-in ones.
    pub path: Option<PathBuf>,
}

/// The fixed lifecycle hook set a plugin implements.
///
/// All hooks default to no-ops so plugins override only what they use.
/// The host guarantees the calling order:
/// `on_game_open` (once) → `on_window_open` (once) → per frame, the tick
/// batch then `render` → `on_game_close` (once, at loop exit).
/// `on_resolution_change` and `on_plugin_load` fire between frames as
/// their events arrive.
pub trait EventHandler {
    /// After host init, before any render surface exists. Bind keys and
    /// register actions here.
    fn on_game_open(&mut self, host: &mut HostCtx<'_>) {
        let _ = host;
    }

    /// Once, when the render surface is created. Load assets and build
    /// renderables here.
    fn on_window_open(&mut self, host: &mut HostCtx<'_>) {
        let _ = host;
    }

    /// Every fixed-timestep simulation step.
    fn on_tick(&mut self, host: &mut HostCtx<'_>) {
        let _ = host;
    }

    /// Once per frame, after the frame's tick batch. Emit draw calls into
    /// `frame`.
    fn render(&mut self, host: &mut HostCtx<'_>, frame: &mut Frame) {
        let _ = (host, frame);
    }

    /// The surface was resized. `width`/`height` are the new dimensions;
    /// the plugin adjusts its own layout only.
    fn on_resolution_change(&mut self, host: &mut HostCtx<'_>, width: u32, height: u32) {
        let _ = (host, width, height);
    }

    /// Loop exit. Flush persistent state (world saves) here.
    fn on_game_close(&mut self, host: &mut HostCtx<'_>) {
        let _ = host;
    }

    /// Another plugin or script finished loading.
    fn on_plugin_load(&mut self, host: &mut HostCtx<'_>, plugin: &PluginInfo) {
        let _ = (host, plugin);
    }
}
