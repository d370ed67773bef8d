use crate::config::GameConfig;
use crate::ctx::{Ctx, HostCtx};
use crate::defaults;
use crate::error::HostError;
use crate::event::{EventHandler, PluginInfo};
use crate::platform::{Platform, PlatformEvent};
use crate::schedule::Scheduler;
use hearth_input::InputManager;
use hearth_render::Frame;
use hearth_scripts::{ScriptError, ScriptHost};
use std::path::Path;
use std::time::{Duration, Instant};

/// Where the game is in its lifecycle. Hooks and operations are gated on
/// this so nothing can render before a surface exists or after close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    WindowOpen,
    Closed,
}

/// The plugin host.
///
/// Owns the context, the binding table, the scheduler, and the ordered
/// handler list. Handlers are dispatched in registration order for every
/// hook. One frame is: poll platform events, run the due tick batch, then
/// one render pass.
pub struct Game {
    config: GameConfig,
    handlers: Vec<Box<dyn EventHandler>>,
    input: InputManager<Ctx>,
    scheduler: Scheduler,
    ctx: Ctx,
    phase: Phase,
    held_interval: u64,
}

impl Game {
    /// Build a host from a validated config. Built-in actions and their
    /// default keys are registered before any plugin runs, so plugins may
    /// rebind or replace them.
    pub fn new(config: GameConfig) -> Result<Self, HostError> {
        config.validate()?;
        let mut input = InputManager::new();
        defaults::register_actions(&mut input);
        defaults::bind_default_keys(&mut input)?;
        let held_interval = config.held_check_interval();
        Ok(Self {
            config,
            handlers: Vec::new(),
            input,
            scheduler: Scheduler::new(),
            ctx: Ctx::new(),
            phase: Phase::Created,
            held_interval,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    pub fn input_mut(&mut self) -> &mut InputManager<Ctx> {
        &mut self.input
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Add a handler to the dispatch list. Handlers run in registration
    /// order for every hook. Only allowed before the window opens.
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) -> Result<(), HostError> {
        if self.phase != Phase::Created {
            return Err(HostError::InvalidState(
                "handlers must be registered before open".into(),
            ));
        }
        self.handlers.push(handler);
        Ok(())
    }

    /// Ask the run loop to exit after the current frame.
    pub fn stop(&mut self) {
        self.ctx.request_stop();
    }

    /// Load plugin scripts from the configured script directory. Each
    /// executed script is announced to every handler through
    /// `on_plugin_load`. The `ScriptHost` guarantees exactly-once
    /// execution per host start.
    pub fn load_scripts(
        &mut self,
        scripts: &mut ScriptHost,
        exec: &mut dyn FnMut(&Path) -> Result<(), ScriptError>,
    ) -> Result<usize, HostError> {
        let dir = self.config.script_dir.clone();
        let executed = scripts.load_directory(&dir, exec)?;
        for path in &executed {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let info = PluginInfo {
                name,
                path: Some(path.clone()),
            };
            self.dispatch(|handler, host| handler.on_plugin_load(host, &info));
        }
        Ok(executed.len())
    }

    /// Apply the configured keybind file. On first run the file does not
    /// exist yet; the current (default) bindings are written out instead
    /// so the user has something to edit. Returns the number of bindings
    /// applied from the file.
    pub fn apply_key_binds(&mut self) -> Result<usize, HostError> {
        let path = self.config.key_binds_file.clone();
        match self.input.load_bindings(&path) {
            Ok(applied) => Ok(applied),
            Err(hearth_input::InputError::MissingFile(_)) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                self.input.save_bindings(&path)?;
                tracing::info!(path = %path.display(), "wrote default key bindings");
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open the game: fire `on_game_open` for every handler, create the
    /// platform surface, then fire `on_window_open`.
    ///
    /// A host with no handlers has nothing to run and is rejected.
    pub fn open(&mut self, platform: &mut dyn Platform) -> Result<(), HostError> {
        if self.phase != Phase::Created {
            return Err(HostError::InvalidState("game already opened".into()));
        }
        if self.handlers.is_empty() {
            return Err(HostError::InvalidState(
                "no event handlers registered".into(),
            ));
        }
        tracing::info!(title = %self.config.title, version = %self.config.version, "opening game");
        self.dispatch(|handler, host| handler.on_game_open(host));

        let surface = platform.open_surface(&self.config)?;
        self.ctx.window.width = surface.width;
        self.ctx.window.height = surface.height;
        self.ctx.window.open = true;
        self.phase = Phase::WindowOpen;

        self.dispatch(|handler, host| handler.on_window_open(host));
        Ok(())
    }

    /// Run one frame: poll and route events, advance one tick, render,
    /// present. Returns `false` once a stop has been requested.
    ///
    /// This is the deterministic single-step form of [`Game::run`]; each
    /// call advances exactly one tick, so ticks and renders alternate
    /// strictly.
    pub fn step_frame(&mut self, platform: &mut dyn Platform) -> Result<bool, HostError> {
        if self.phase != Phase::WindowOpen {
            return Err(HostError::InvalidState(
                "step_frame requires an open window".into(),
            ));
        }
        self.process_events(platform.poll_events());
        self.tick();
        let frame = self.render_frame();
        platform.present(&frame);
        Ok(!self.ctx.stop_requested())
    }

    /// The blocking run loop: open, frames at the configured tick rate
    /// until a stop is requested, then close.
    ///
    /// When the loop falls behind, up to `max_ticks_per_frame` catch-up
    /// ticks run before the next render; any backlog beyond that is
    /// dropped.
    pub fn run(&mut self, platform: &mut dyn Platform) -> Result<(), HostError> {
        self.open(platform)?;

        let tick_dt = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut last = Instant::now();
        let mut accumulator = Duration::ZERO;

        while !self.ctx.stop_requested() {
            let now = Instant::now();
            accumulator += now - last;
            last = now;

            self.process_events(platform.poll_events());

            let mut ticks = 0u32;
            while accumulator >= tick_dt && ticks < self.config.max_ticks_per_frame {
                accumulator -= tick_dt;
                self.tick();
                ticks += 1;
            }
            if ticks == self.config.max_ticks_per_frame && accumulator >= tick_dt {
                tracing::warn!(
                    dropped_ms = accumulator.as_millis() as u64,
                    "tick backlog exceeded cap, dropping"
                );
                accumulator = Duration::ZERO;
            }

            let frame = self.render_frame();
            platform.present(&frame);

            let elapsed = last.elapsed();
            if let Some(sleep) = tick_dt.checked_sub(elapsed + accumulator) {
                std::thread::sleep(sleep);
            }
        }

        self.close();
        Ok(())
    }

    /// Fire `on_game_close` for every handler, once. Safe to call again
    /// after the loop has already closed; later calls do nothing.
    pub fn close(&mut self) {
        match self.phase {
            Phase::WindowOpen => {
                tracing::info!("closing game");
                self.dispatch(|handler, host| handler.on_game_close(host));
                self.ctx.window.open = false;
                self.phase = Phase::Closed;
            }
            Phase::Created => self.phase = Phase::Closed,
            Phase::Closed => {}
        }
    }

    fn process_events(&mut self, events: Vec<PlatformEvent>) {
        for event in events {
            match event {
                PlatformEvent::Key { key, state, mods } => {
                    self.input.dispatch_key(key, state, mods, &mut self.ctx);
                }
                PlatformEvent::CursorMoved { x, y } => {
                    self.ctx.cursor.x = x;
                    self.ctx.cursor.y = y;
                }
                PlatformEvent::Resized { width, height } => {
                    self.ctx.window.width = width;
                    self.ctx.window.height = height;
                    tracing::debug!(width, height, "surface resized");
                    self.dispatch(|handler, host| {
                        handler.on_resolution_change(host, width, height)
                    });
                }
                PlatformEvent::CloseRequested => self.ctx.request_stop(),
            }
        }
    }

    /// One simulation step: advance the tick counter, re-fire latched
    /// holds at the held-input cadence, run due scheduled tasks, then the
    /// handlers' tick hooks.
    fn tick(&mut self) {
        self.ctx.advance_tick();
        if self.ctx.tick() % self.held_interval == 0 {
            self.input.run_held(&mut self.ctx);
        }
        self.scheduler.run_due(self.ctx.tick(), &mut self.ctx);
        self.dispatch(|handler, host| handler.on_tick(host));
    }

    fn render_frame(&mut self) -> Frame {
        let mut frame = Frame::new();
        let mut host = HostCtx {
            input: &mut self.input,
            scheduler: &mut self.scheduler,
            ctx: &mut self.ctx,
        };
        for handler in &mut self.handlers {
            handler.render(&mut host, &mut frame);
        }
        frame
    }

    fn dispatch(&mut self, mut hook: impl FnMut(&mut dyn EventHandler, &mut HostCtx<'_>)) {
        let mut host = HostCtx {
            input: &mut self.input,
            scheduler: &mut self.scheduler,
            ctx: &mut self.ctx,
        };
        for handler in &mut self.handlers {
            hook(handler.as_mut(), &mut host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use hearth_common::{KeyCode, KeyState, Modifiers, RenderMode, Trigger};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        log: Log,
    }

    impl Recorder {
        fn new(log: &Log) -> Box<Self> {
            Box::new(Self {
                log: Rc::clone(log),
            })
        }

        fn push(&self, label: impl Into<String>) {
            self.log.borrow_mut().push(label.into());
        }
    }

    impl EventHandler for Recorder {
        fn on_game_open(&mut self, _host: &mut HostCtx<'_>) {
            self.push("game_open");
        }
        fn on_window_open(&mut self, host: &mut HostCtx<'_>) {
            self.push(format!(
                "window_open {}x{}",
                host.ctx.window.width, host.ctx.window.height
            ));
        }
        fn on_tick(&mut self, _host: &mut HostCtx<'_>) {
            self.push("tick");
        }
        fn render(&mut self, _host: &mut HostCtx<'_>, _frame: &mut Frame) {
            self.push("render");
        }
        fn on_resolution_change(&mut self, _host: &mut HostCtx<'_>, width: u32, height: u32) {
            self.push(format!("resize {width}x{height}"));
        }
        fn on_game_close(&mut self, _host: &mut HostCtx<'_>) {
            self.push("game_close");
        }
        fn on_plugin_load(&mut self, _host: &mut HostCtx<'_>, plugin: &PluginInfo) {
            self.push(format!("plugin {}", plugin.name));
        }
    }

    fn test_config() -> GameConfig {
        GameConfig::new("Test", "0.1", 30.0, RenderMode::Mode2D)
    }

    fn game_with_recorder(log: &Log) -> Game {
        let mut game = Game::new(test_config()).unwrap();
        game.register_handler(Recorder::new(log)).unwrap();
        game
    }

    #[test]
    fn lifecycle_hooks_fire_in_order() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(2);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}
        game.close();

        assert_eq!(
            *log.borrow(),
            vec![
                "game_open",
                "window_open 640x480",
                "tick",
                "render",
                "tick",
                "render",
                "game_close",
            ]
        );
    }

    #[test]
    fn ticks_and_renders_alternate_strictly() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(5);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        let frames: Vec<String> = log
            .borrow()
            .iter()
            .filter(|l| *l == "tick" || *l == "render")
            .cloned()
            .collect();
        for pair in frames.chunks(2) {
            assert_eq!(pair, ["tick", "render"]);
        }
        assert_eq!(platform.presented(), 5);
    }

    #[test]
    fn open_without_handlers_is_invalid_state() {
        let mut game = Game::new(test_config()).unwrap();
        let mut platform = HeadlessPlatform::new(640, 480);
        assert!(matches!(
            game.open(&mut platform),
            Err(HostError::InvalidState(_))
        ));
    }

    #[test]
    fn open_twice_is_invalid_state() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480);
        game.open(&mut platform).unwrap();
        assert!(matches!(
            game.open(&mut platform),
            Err(HostError::InvalidState(_))
        ));
    }

    #[test]
    fn register_after_open_is_invalid_state() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480);
        game.open(&mut platform).unwrap();
        assert!(matches!(
            game.register_handler(Recorder::new(&log)),
            Err(HostError::InvalidState(_))
        ));
    }

    #[test]
    fn close_fires_exactly_once() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480);

        game.open(&mut platform).unwrap();
        game.close();
        game.close();

        let closes = log.borrow().iter().filter(|l| *l == "game_close").count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn resize_event_updates_window_and_notifies_handlers() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(2);
        platform.queue_frame(vec![PlatformEvent::Resized {
            width: 1280,
            height: 720,
        }]);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        assert!(log.borrow().iter().any(|l| l == "resize 1280x720"));
        assert_eq!(game.ctx().window.width, 1280);
        assert_eq!(game.ctx().window.height, 720);
    }

    #[test]
    fn cursor_events_update_context() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(1);
        platform.queue_frame(vec![PlatformEvent::CursorMoved { x: 0.25, y: -0.5 }]);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        assert_eq!(game.ctx().cursor.x, 0.25);
        assert_eq!(game.ctx().cursor.y, -0.5);
    }

    #[test]
    fn bound_key_fires_during_run() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        {
            let log = Rc::clone(&log);
            game.input_mut().bind(
                KeyCode::Space,
                Modifiers::NONE,
                Trigger::Press,
                Box::new(move |_: &mut Ctx| log.borrow_mut().push("jump".into())),
            );
        }
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(2);
        platform.queue_frame(vec![PlatformEvent::Key {
            key: KeyCode::Space,
            state: KeyState::Pressed,
            mods: Modifiers::NONE,
        }]);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        assert!(log.borrow().iter().any(|l| l == "jump"));
    }

    #[test]
    fn default_stop_binding_exits_loop() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(100);
        platform.queue_frame(vec![PlatformEvent::Key {
            key: KeyCode::Escape,
            state: KeyState::Pressed,
            mods: Modifiers::SHIFT,
        }]);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        assert_eq!(platform.presented(), 1);
    }

    #[test]
    fn held_binding_refires_at_cadence() {
        let log: Log = Rc::default();
        // 30 ticks/s, 10 checks/s: holds re-fire every 3rd tick.
        let mut game = game_with_recorder(&log);
        {
            let log = Rc::clone(&log);
            game.input_mut().bind(
                KeyCode::W,
                Modifiers::NONE,
                Trigger::Hold,
                Box::new(move |_: &mut Ctx| log.borrow_mut().push("held".into())),
            );
        }
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(7);
        platform.queue_frame(vec![PlatformEvent::Key {
            key: KeyCode::W,
            state: KeyState::Pressed,
            mods: Modifiers::NONE,
        }]);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        // Press edge plus checks at ticks 3 and 6.
        let fires = log.borrow().iter().filter(|l| *l == "held").count();
        assert_eq!(fires, 3);
    }

    #[test]
    fn scheduled_task_runs_during_loop() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        {
            let log = Rc::clone(&log);
            game.scheduler_mut().run_later(
                Box::new(move |ctx: &mut Ctx| {
                    log.borrow_mut().push(format!("task@{}", ctx.tick()));
                }),
                2,
            );
        }
        let mut platform = HeadlessPlatform::new(640, 480).with_frame_budget(3);

        game.open(&mut platform).unwrap();
        while game.step_frame(&mut platform).unwrap() {}

        assert!(log.borrow().iter().any(|l| l == "task@2"));
    }

    #[test]
    fn scripts_announce_plugin_load_per_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("alpha.py"), "").unwrap();
        std::fs::write(tmp.path().join("beta.py"), "").unwrap();

        let log: Log = Rc::default();
        let mut config = test_config();
        config.script_dir = tmp.path().to_path_buf();
        let mut game = Game::new(config).unwrap();
        game.register_handler(Recorder::new(&log)).unwrap();

        let mut scripts = ScriptHost::new("py");
        let mut exec = |_: &Path| Ok(());
        let loaded = game.load_scripts(&mut scripts, &mut exec).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(*log.borrow(), vec!["plugin alpha", "plugin beta"]);

        // Same host start: nothing new to load or announce.
        let again = game.load_scripts(&mut scripts, &mut exec).unwrap();
        assert_eq!(again, 0);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn apply_key_binds_writes_defaults_then_loads() {
        let tmp = tempfile::tempdir().unwrap();
        let binds = tmp.path().join("cfg/keys.cfg");

        let mut config = test_config();
        config.key_binds_file = binds.clone();
        let mut game = Game::new(config.clone()).unwrap();

        // First run: no file yet, defaults get written.
        assert_eq!(game.apply_key_binds().unwrap(), 0);
        assert!(binds.exists());

        // Second run picks the file up.
        let mut game = Game::new(config).unwrap();
        let applied = game.apply_key_binds().unwrap();
        assert_eq!(applied, 2);
    }

    #[test]
    fn step_before_open_is_invalid_state() {
        let log: Log = Rc::default();
        let mut game = game_with_recorder(&log);
        let mut platform = HeadlessPlatform::new(640, 480);
        assert!(matches!(
            game.step_frame(&mut platform),
            Err(HostError::InvalidState(_))
        ));
    }
}
