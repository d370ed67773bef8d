use crate::schedule::Scheduler;
use hearth_assets::AssetCatalog;
use hearth_input::InputManager;
use hearth_render::RenderList;
use hearth_world::TileGrid;

/// Cursor position in normalized screen coordinates, plus visibility.
#[derive(Debug, Clone, Copy)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visible: true,
        }
    }
}

/// Current render-surface dimensions. `open` flips when the platform
/// surface is created.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowInfo {
    pub width: u32,
    pub height: u32,
    pub open: bool,
}

/// The host-owned state handed to every plugin callback.
///
/// This is the explicit replacement for the globals the original consumer
/// scripts shared: world, renderables, assets, cursor, and window state
/// all live here, owned by the game object and borrowed out per callback.
#[derive(Default)]
pub struct Ctx {
    /// The active world, if a plugin loaded or created one.
    pub world: Option<TileGrid>,
    /// Ordered renderable registry.
    pub renderables: RenderList,
    /// Model/texture catalog.
    pub assets: AssetCatalog,
    pub cursor: CursorState,
    pub window: WindowInfo,
    tick: u64,
    stop_requested: bool,
}

impl Ctx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed simulation ticks since the game opened.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ask the run loop to exit. `on_game_close` fires once at loop exit.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

/// Everything a lifecycle hook may touch: the binding table, the
/// scheduler, and the context state.
///
/// Input callbacks and scheduled tasks receive only [`Ctx`]; bindings and
/// schedules are laid down in lifecycle hooks, which see the full view.
pub struct HostCtx<'a> {
    pub input: &'a mut InputManager<Ctx>,
    pub scheduler: &'a mut Scheduler,
    pub ctx: &'a mut Ctx,
}
