use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hearth_common::{KeyCode, KeyState, Modifiers, RenderMode, Trigger};
use hearth_host::{
    Ctx, EventHandler, Frame, Game, GameConfig, HeadlessPlatform, HostCtx, HostError,
    PlatformEvent, PluginInfo,
};
use hearth_input::Callback;
use hearth_scripts::ScriptHost;
use hearth_world::{Tile, TileGrid};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hearth", version, about = "Tile-world plugin host")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the demo tile painter headless for a fixed number of frames.
    Run {
        /// Config file; defaults are used when it does not exist.
        #[arg(long, default_value = "hearth.yaml")]
        config: PathBuf,
        /// Frames to run before requesting close.
        #[arg(long, default_value_t = 120)]
        frames: u64,
        /// World grid dimension when creating a fresh world.
        #[arg(long, default_value_t = 64)]
        dimension: usize,
    },
    /// Write a default config file.
    ConfigInit {
        #[arg(long, default_value = "hearth.yaml")]
        path: PathBuf,
    },
    /// Create and save an empty world file.
    WorldCreate {
        path: PathBuf,
        #[arg(long, default_value_t = 64)]
        dimension: usize,
    },
    /// Summarize a world file.
    WorldInspect { path: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run {
            config,
            frames,
            dimension,
        } => run(&config, frames, dimension),
        Command::ConfigInit { path } => config_init(&path),
        Command::WorldCreate { path, dimension } => world_create(&path, dimension),
        Command::WorldInspect { path } => world_inspect(&path),
    }
}

fn run(config_path: &Path, frames: u64, dimension: usize) -> Result<()> {
    let config = match GameConfig::load_yaml(config_path) {
        Ok(config) => config,
        Err(HostError::ResourceMissing(_)) => {
            tracing::info!(path = %config_path.display(), "no config file, using defaults");
            GameConfig::new("Hearth Demo", "0.1", 30.0, RenderMode::Mode2D)
        }
        Err(e) => return Err(e).context("loading config"),
    };
    let world_file = config.world_file.clone();
    let script_dir = config.script_dir.clone();

    let mut game = Game::new(config).context("building host")?;
    game.register_handler(Box::new(TilePainter::new(dimension, world_file)))
        .context("registering demo plugin")?;
    game.apply_key_binds().context("applying key bindings")?;

    let mut scripts = ScriptHost::new("py");
    let loaded = game
        .load_scripts(&mut scripts, &mut |path| {
            // No interpreter is embedded; just verify the file reads.
            std::fs::read_to_string(path)?;
            Ok(())
        })
        .context("loading scripts")?;
    tracing::info!(loaded, dir = %script_dir.display(), "startup scripts done");

    let mut platform = HeadlessPlatform::new(1280, 720).with_frame_budget(frames);
    // Scripted demo input: paint one grass tile at the center, then save.
    platform.queue_frame(vec![
        PlatformEvent::CursorMoved { x: 0.0, y: 0.0 },
        PlatformEvent::Key {
            key: KeyCode::MouseLeft,
            state: KeyState::Pressed,
            mods: Modifiers::NONE,
        },
    ]);
    platform.queue_frame(vec![PlatformEvent::Key {
        key: KeyCode::MouseLeft,
        state: KeyState::Released,
        mods: Modifiers::NONE,
    }]);

    game.run(&mut platform).context("run loop")?;

    if let Some(world) = &game.ctx().world {
        let (grass, stone) = tile_counts(world);
        println!(
            "ran {} frames, world {}x{}: {} grass, {} stone",
            platform.presented(),
            world.dimension(),
            world.dimension(),
            grass,
            stone
        );
    }
    Ok(())
}

fn config_init(path: &Path) -> Result<()> {
    let config = GameConfig::default();
    config
        .save_yaml(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn world_create(path: &Path, dimension: usize) -> Result<()> {
    let world = TileGrid::create(dimension, path);
    world
        .save()
        .with_context(|| format!("saving {}", path.display()))?;
    println!("created {}x{} world at {}", dimension, dimension, path.display());
    Ok(())
}

fn world_inspect(path: &Path) -> Result<()> {
    let world = TileGrid::load(path).with_context(|| format!("loading {}", path.display()))?;
    let (grass, stone) = tile_counts(&world);
    let total = world.dimension() * world.dimension();
    println!(
        "{}: {}x{}, {} grass, {} stone, {} air",
        path.display(),
        world.dimension(),
        world.dimension(),
        grass,
        stone,
        total - grass - stone
    );
    Ok(())
}

fn tile_counts(world: &TileGrid) -> (usize, usize) {
    let grass = world.tiles().iter().filter(|t| **t == Tile::Grass).count();
    let stone = world.tiles().iter().filter(|t| **t == Tile::Stone).count();
    (grass, stone)
}

/// The demo plugin: paints tiles under the cursor with the mouse buttons
/// and persists the world on close.
struct TilePainter {
    dimension: usize,
    world_file: PathBuf,
}

impl TilePainter {
    fn new(dimension: usize, world_file: PathBuf) -> Self {
        Self {
            dimension,
            world_file,
        }
    }
}

fn paint(tile: Tile) -> Callback<Ctx> {
    Box::new(move |ctx: &mut Ctx| {
        let Some(world) = &mut ctx.world else { return };
        if let Some((x, y)) = world.tile_at_screen(ctx.cursor.x, ctx.cursor.y) {
            if let Err(e) = world.set_tile(x, y, tile) {
                tracing::warn!(error = %e, "paint rejected");
            }
        }
    })
}

impl EventHandler for TilePainter {
    fn on_game_open(&mut self, host: &mut HostCtx<'_>) {
        host.input.register_action("setgrass", paint(Tile::Grass));
        host.input.register_action("setstone", paint(Tile::Stone));
        host.input.register_action("setair", paint(Tile::Air));

        let binds = [
            (KeyCode::MouseLeft, "setgrass"),
            (KeyCode::MouseRight, "setstone"),
            (KeyCode::MouseMiddle, "setair"),
        ];
        for (key, action) in binds {
            if let Err(e) = host
                .input
                .bind_action(key, Modifiers::NONE, Trigger::Hold, action)
            {
                tracing::warn!(error = %e, action, "paint binding failed");
            }
        }
        if let Err(e) =
            host.input
                .bind_action(KeyCode::S, Modifiers::CTRL, Trigger::Press, "save_world")
        {
            tracing::warn!(error = %e, "save binding failed");
        }
    }

    fn on_window_open(&mut self, host: &mut HostCtx<'_>) {
        match TileGrid::load_or_create(self.dimension, &self.world_file) {
            Ok(world) => host.ctx.world = Some(world),
            Err(e) => tracing::error!(error = %e, "world load failed, running without one"),
        }
    }

    fn render(&mut self, host: &mut HostCtx<'_>, frame: &mut Frame) {
        if let Some(world) = &host.ctx.world {
            frame.draw_tiles(world);
        }
        frame.draw_list(&host.ctx.renderables);
    }

    fn on_resolution_change(&mut self, _host: &mut HostCtx<'_>, width: u32, height: u32) {
        tracing::info!(width, height, "surface resized");
    }

    fn on_game_close(&mut self, host: &mut HostCtx<'_>) {
        if let Some(world) = &host.ctx.world {
            if let Err(e) = world.save() {
                tracing::error!(error = %e, "world save on close failed");
            }
        }
    }

    fn on_plugin_load(&mut self, _host: &mut HostCtx<'_>, plugin: &PluginInfo) {
        tracing::info!(name = %plugin.name, "script plugin loaded");
    }
}
