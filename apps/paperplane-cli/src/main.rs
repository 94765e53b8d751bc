use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use paperplane_game::{Flight, GameConfig, Outcome, Pilot, PilotKind};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paperplane-cli", about = "Headless runner for Plain Paper Plane")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Fly a scripted pilot without a window and report the result
    Simulate {
        /// Maximum number of frames to run
        #[arg(short, long, default_value = "3600")]
        frames: u64,
        /// RNG seed, overriding the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML game config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Who flies the plane
        #[arg(short, long, value_enum, default_value = "seek")]
        pilot: PilotArg,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PilotArg {
    Glide,
    Hold,
    Seek,
}

impl From<PilotArg> for PilotKind {
    fn from(arg: PilotArg) -> Self {
        match arg {
            PilotArg::Glide => PilotKind::Glide,
            PilotArg::Hold => PilotKind::Hold,
            PilotArg::Seek => PilotKind::Seek,
        }
    }
}

#[derive(Serialize)]
struct Report {
    seed: Option<u64>,
    pilot: PilotKind,
    frames: u64,
    score: u32,
    outcome: Option<Outcome>,
    plane_position: Vec2,
    drawn: usize,
}

fn simulate(config: GameConfig, kind: PilotKind, frames: u64) -> anyhow::Result<Report> {
    let seed = config.seed;
    let mut flight = Flight::new(config)?;
    let mut pilot = Pilot::new(kind);
    let mut drawn = 0;

    while flight.frame_count() < frames && !flight.is_over() {
        let observation = flight.observation()?;
        let events = pilot.events(&observation, flight.config());
        flight.process_events(&events);
        flight.step()?;
        drawn = flight.frame()?.draw_list.len();
    }

    let observation = flight.observation()?;
    Ok(Report {
        seed,
        pilot: kind,
        frames: flight.frame_count(),
        score: flight.score(),
        outcome: flight.outcome(),
        plane_position: observation.plane_position,
        drawn,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("paperplane-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("ecs: {}", paperplane_ecs::crate_info());
            println!("kernel: {}", paperplane_kernel::crate_info());
            println!("game: {}", paperplane_game::crate_info());
        }
        Commands::Simulate {
            frames,
            seed,
            config,
            pilot,
            json,
        } => {
            let mut game_config = match &config {
                Some(path) => GameConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GameConfig::default(),
            };
            if seed.is_some() {
                game_config.seed = seed;
            }
            tracing::info!(seed = ?game_config.seed, frames, "simulation starting");

            let report = simulate(game_config, pilot.into(), frames)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let outcome = match report.outcome {
                    Some(Outcome::Crashed { .. }) => "crashed",
                    Some(Outcome::Quit) => "quit",
                    None => "still flying",
                };
                println!(
                    "Simulation: pilot={:?}, seed={:?}",
                    report.pilot, report.seed
                );
                println!("Frames: {}, score: {}", report.frames, report.score);
                println!(
                    "Outcome: {outcome} at ({:.1}, {:.1}), {} sprites in last frame",
                    report.plane_position.x, report.plane_position.y, report.drawn
                );
            }
        }
    }

    Ok(())
}
