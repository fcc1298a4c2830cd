//! Glint CLI
//!
//! Preview Glint effects from the terminal without a host UI.

mod config;
mod preview;

use anyhow::Result;
use clap::{Parser, Subcommand};
use glint_effects::RevealDirection;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use preview::Pace;

#[derive(Parser)]
#[command(name = "glint")]
#[command(author, version, about = "Glint micro-interaction effects")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file, or a directory containing glint.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default glint.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing glint.toml
        #[arg(long)]
        force: bool,
    },

    /// Simulate one click and print the spark segments of each frame
    Spark {
        /// Click x coordinate
        #[arg(long, default_value = "50")]
        x: f32,

        /// Click y coordinate
        #[arg(long, default_value = "50")]
        y: f32,

        /// Time between frames in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f64,

        /// Number of frames to render
        #[arg(long, default_value = "30")]
        frames: u32,
    },

    /// Scramble a string and print every frame until it settles
    Text {
        /// Text to scramble
        text: String,

        /// Reveal one character per tick
        #[arg(long)]
        sequential: bool,

        /// Reveal order (start, end, center)
        #[arg(long)]
        direction: Option<String>,

        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,

        /// Pace frames against the wall clock
        #[arg(long)]
        realtime: bool,
    },

    /// Print the blur container and layer CSS
    Blur,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { dir, force } => {
            let path = config::init(&dir, force)?;
            info!("Wrote {}", path.display());
            println!("Created {}", path.display());
        }

        Commands::Spark {
            x,
            y,
            frame_ms,
            frames,
        } => {
            let effects = config::load(cli.config.as_deref())?;
            for line in preview::spark_frames(&effects.spark, x, y, frame_ms, frames) {
                println!("{line}");
            }
        }

        Commands::Text {
            text,
            sequential,
            direction,
            seed,
            realtime,
        } => {
            let mut effects = config::load(cli.config.as_deref())?;
            if sequential {
                effects.text.sequential = true;
            }
            if let Some(name) = direction {
                effects.text.reveal_direction = RevealDirection::from_name(&name)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Unknown reveal direction '{}'. Expected start, end, or center.",
                            name
                        )
                    })?;
            }

            let pace = if realtime {
                Pace::Realtime
            } else {
                Pace::Simulated
            };
            preview::play_text(&text, &effects.text, seed, pace, |frame| {
                println!("{frame}")
            });
        }

        Commands::Blur => {
            let effects = config::load(cli.config.as_deref())?;
            for line in preview::blur_report(&effects.blur) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
