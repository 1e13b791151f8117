#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that launches Arena Survivors.

mod headless;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use arena_survivors_core::{ArenaSize, Difficulty, PlayerClass, WINDOW_TITLE};
use arena_survivors_rendering::{Color, Presentation, RenderingBackend};
use arena_survivors_rendering_macroquad::MacroquadBackend;
use arena_survivors_simulation::{Config, Simulation};
use clap::{Parser, ValueEnum};

/// Playable class accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
    Assassin,
    Ranger,
}

impl From<ClassArg> for PlayerClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Warrior => PlayerClass::Warrior,
            ClassArg::Mage => PlayerClass::Mage,
            ClassArg::Assassin => PlayerClass::Assassin,
            ClassArg::Ranger => PlayerClass::Ranger,
        }
    }
}

/// Difficulty preset accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Nightmare,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Nightmare => Difficulty::Nightmare,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "arena-survivors")]
#[command(about = "Survive waves of enemies in a small arena")]
struct CliArgs {
    /// Start immediately with this class instead of showing the class picker.
    #[arg(long, value_enum)]
    class: Option<ClassArg>,

    /// Difficulty preset applied to enemies and rewards.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Seed for spawns, critical hits and buff offers.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Run this many frames without a window and print a summary.
    #[arg(long)]
    headless_frames: Option<u32>,

    /// Simulated frame length used by headless runs, in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// TOML manifest mapping classes and enemies to sprite images.
    #[arg(long)]
    sprite_manifest: Option<PathBuf>,

    /// Print the headless summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Arena Survivors command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = Config::new(ArenaSize::DEFAULT, args.difficulty.into(), args.seed);

    if let Some(frames) = args.headless_frames {
        let class = args.class.map_or(PlayerClass::Warrior, PlayerClass::from);
        let frame = Duration::from_millis(args.frame_ms);
        let report = headless::run(config, class, frames, frame)?;
        if args.json {
            let json =
                serde_json::to_string_pretty(&report).context("failed to encode run summary")?;
            println!("{json}");
        } else {
            println!("{report}");
        }
        return Ok(());
    }

    run_windowed(config, &args)
}

fn run_windowed(config: Config, args: &CliArgs) -> Result<()> {
    let mut simulation = Simulation::new(config);
    if let Some(class) = args.class {
        simulation
            .select_class(class.into())
            .context("failed to start the requested class")?;
    }

    let arena = config.arena();
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::from_rgb_u8(0x0f, 0x0f, 0x1e),
        arena.width(),
        arena.height(),
    )
    .context("invalid arena dimensions")?;

    tracing::info!(
        seed = config.seed(),
        difficulty = ?config.difficulty(),
        "opening game window"
    );
    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_manifest(args.sprite_manifest.clone())
        .run(presentation, move |dt, input| {
            simulation.handle_input(dt, input)
        })
}
