//! Headless raid runner
//!
//! Loads a game configuration, loads (or synthesizes) the textures and
//! fonts, then flies a scripted pilot through the world with a fixed time
//! step. Every frame is drawn into an in-memory recorder, so the full
//! update/draw path runs without a window.

mod pilot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use scroll_engine::core::ConfigError;
use scroll_engine::foundation::logging;
use scroll_engine::prelude::*;

use pilot::ScriptedPilot;

/// Render frames per simulated second
const FRAME_RATE: f32 = 30.0;

#[derive(Parser, Debug)]
#[command(name = "raid", about = "Fly a scripted raid through the scrolling shooter world", version)]
struct Args {
    /// Configuration file (.toml or .ron); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use placeholder textures and fonts instead of reading asset files
    #[arg(long)]
    synthetic_assets: bool,

    /// Stop after this many simulation steps
    #[arg(long)]
    max_frames: Option<u64>,

    /// Log level, unless RUST_LOG is set
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RaidError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("World error: {0}")]
    World(#[from] WorldError),
}

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq, Eq)]
struct RaidSummary {
    status: MissionStatus,
    steps: u64,
    player_hitpoints: i32,
    enemies_remaining: usize,
    draw_commands: usize,
}

fn load_config(args: &Args) -> Result<GameConfig, RaidError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(level) = &args.log_level {
        config.engine.log_level.clone_from(level);
    }
    if let Some(frames) = args.max_frames {
        config.engine.max_frames = Some(frames);
    }

    config.validate()?;
    Ok(config)
}

fn load_resources(
    assets: &AssetConfig,
    synthetic: bool,
) -> Result<(TextureHolder, FontHolder), RaidError> {
    let mut textures = TextureHolder::new();
    let mut fonts = FontHolder::new();

    if synthetic {
        log::info!("Using synthetic textures and fonts");
        textures.insert(TextureId::Entities, Texture::new(512, 256))?;
        textures.insert(TextureId::Jungle, Texture::new(512, 512))?;
        fonts.insert(FontId::Main, Font::from_bytes(b"synthetic".to_vec()))?;
    } else {
        textures.load(TextureId::Entities, assets.resolve(&assets.entities_texture))?;
        textures.load(TextureId::Jungle, assets.resolve(&assets.jungle_texture))?;
        fonts.load(FontId::Main, assets.resolve(&assets.main_font))?;
    }

    Ok((textures, fonts))
}

fn fly(config: &GameConfig, textures: &TextureHolder, fonts: &FontHolder) -> Result<RaidSummary, RaidError> {
    let mut world = World::new(&config.world, textures, fonts)?;
    let mut controller = PlayerController::new();
    let mut pilot = ScriptedPilot::new();
    let mut timestep = FixedTimestep::new(config.engine.fixed_timestep);
    let mut recorder = DrawRecorder::new();
    let mut timer = Timer::new();
    let mut steps: u64 = 0;

    'frames: loop {
        for _ in 0..timestep.advance(1.0 / FRAME_RATE) {
            let dt = timestep.step();

            for event in pilot.advance(dt) {
                controller.handle_event(event, world.command_queue_mut());
            }
            controller.handle_realtime_input(|key| pilot.is_pressed(key), world.command_queue_mut());

            world.update(dt);
            steps += 1;

            controller.set_mission_status(world.mission_status());
            if controller.mission_status() != MissionStatus::Running {
                break 'frames;
            }
            if config.engine.max_frames.is_some_and(|max| steps >= max) {
                log::info!("Frame limit of {steps} reached");
                break 'frames;
            }
        }

        recorder.clear();
        world.draw(&mut recorder);
        timer.tick();
    }

    recorder.clear();
    world.draw(&mut recorder);

    log::info!(
        "Simulated {:.1}s in {} steps, {} frames drawn ({:.0} frames/s wall clock)",
        steps as f32 * timestep.step(),
        steps,
        timer.frames(),
        timer.average_fps()
    );

    Ok(RaidSummary {
        status: controller.mission_status(),
        steps,
        player_hitpoints: world.player_aircraft().map_or(0, Aircraft::hitpoints),
        enemies_remaining: world.remaining_spawns()
            + world.scene_graph().nodes_matching(Category::ENEMY_AIRCRAFT).len(),
        draw_commands: recorder.len(),
    })
}

fn run(args: &Args) -> Result<(), RaidError> {
    let config = load_config(args)?;
    logging::init(&config.engine.log_level);

    if let Some(path) = &args.dump_config {
        config.save_to_file(path)?;
        log::info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let (textures, fonts) = load_resources(&config.assets, args.synthetic_assets)?;
    let summary = fly(&config, &textures, &fonts)?;

    log::info!(
        "Raid over: {:?} after {} steps, player at {} HP, {} enemies left, {} draw calls in the last frame",
        summary.status,
        summary.steps,
        summary.player_hitpoints,
        summary.enemies_remaining,
        summary.draw_commands
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger may not be up yet if the configuration failed
            logging::init("info");
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic() -> (TextureHolder, FontHolder) {
        load_resources(&AssetConfig::default(), true).unwrap()
    }

    #[test]
    fn test_frame_limit_stops_the_run() {
        let (textures, fonts) = synthetic();
        let mut config = GameConfig::default();
        config.engine.max_frames = Some(120);

        let summary = fly(&config, &textures, &fonts).unwrap();

        assert_eq!(summary.steps, 120);
        assert_eq!(summary.status, MissionStatus::Running);
        assert!(summary.player_hitpoints > 0);
        assert!(summary.draw_commands > 0);
    }

    #[test]
    fn test_empty_sky_ends_in_success() {
        let (textures, fonts) = synthetic();
        let mut config = GameConfig::default();
        config.world = WorldConfig::default().with_spawn_points(Vec::new());
        config.world.world_height = 600.0;
        config.world.scroll_speed = -400.0;

        let summary = fly(&config, &textures, &fonts).unwrap();

        assert_eq!(summary.status, MissionStatus::Success);
        assert_eq!(summary.enemies_remaining, 0);
    }

    #[test]
    fn test_missing_asset_files_are_reported() {
        let assets = AssetConfig::default().with_assets_dir("/nonexistent/raid/media");
        let result = load_resources(&assets, false);
        assert!(matches!(
            result,
            Err(RaidError::Resource(ResourceError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["raid", "--max-frames", "10", "--log-level", "debug"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.engine.max_frames, Some(10));
        assert_eq!(config.engine.log_level, "debug");
    }
}
