use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use finger_roi_cli::{config_schema, init_config, summarize, ProcessJob};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one rotated ROI per finger from a hand image
    Process {
        /// Path to the hand image
        #[arg(short, long)]
        image: PathBuf,
        /// Landmark JSON (defaults to the image path with a .json extension)
        #[arg(short, long)]
        landmarks: Option<PathBuf>,
        /// Pre-segmented version of the image with a dark background
        #[arg(short, long)]
        segmented: Option<PathBuf>,
        /// Directory for the binary mask (and overlay)
        #[arg(long)]
        masks_dir: PathBuf,
        /// Directory for the per-finger crops
        #[arg(long)]
        fingers_dir: PathBuf,
        /// Pipeline configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration file
    InitConfig {
        /// Destination (.toml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the JSON schema of the configuration file
    ConfigSchema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process { image, landmarks, segmented, masks_dir, fingers_dir, config } => {
            let job = ProcessJob { image, landmarks, segmented, masks_dir, fingers_dir, config };
            let report = job.run()?;
            info!("{}", summarize(&report));
        }
        Commands::InitConfig { output } => {
            init_config(&output)?;
            info!("Default configuration saved to: {:?}", output);
        }
        Commands::ConfigSchema => {
            println!("{}", config_schema()?);
        }
    }

    Ok(())
}
