//! Kinetrace CLI: command-line interface for pose kinematics analysis.
//!
//! Usage:
//!   kinetrace analyze <INPUT> -o <DIR>   Smooth keypoints and write math reports
//!   kinetrace validate <INPUT>           Check a keypoint stream
//!   kinetrace config                     Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kinetrace_common::config::{config_file_path, AppConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "kinetrace",
    about = "Temporally smoothed joint kinematics from pose keypoints",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit structured JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/kinetrace/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a keypoint stream and write math reports
    Analyze {
        /// Keypoint stream (JSONL, one frame per line)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Smoothing window (frames)
        #[arg(long)]
        window: Option<usize>,

        /// Source frame rate, overriding the stream header
        #[arg(long)]
        fps: Option<f64>,

        /// Normalize the stream to this frame rate by dropping frames
        #[arg(long)]
        target_fps: Option<f64>,

        /// Visibility below which a detection reuses the last position
        #[arg(long)]
        visibility_threshold: Option<f64>,

        /// Also write per-frame overlay plans (overlay.jsonl)
        #[arg(long)]
        overlay: bool,
    },

    /// Validate a keypoint stream
    Validate {
        /// Keypoint stream (JSONL)
        input: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    logging.json |= cli.json_logs;
    kinetrace_common::logging::init_logging(&logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Analyze {
            input,
            output,
            window,
            fps,
            target_fps,
            visibility_threshold,
            overlay,
        } => commands::analyze::run(
            commands::analyze::AnalyzeOptions {
                input,
                output,
                window,
                fps,
                target_fps,
                visibility_threshold,
                overlay,
            },
            &config.pipeline,
        ),
        Commands::Validate { input } => commands::validate::run(input),
        Commands::Config => commands::config::run(&config, &config_path),
    }
}
