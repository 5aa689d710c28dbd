use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use trellis::artifact::TopicArtifact;
use trellis::config::Config;

/// Trellis: topic dendrogram and coverage chart for a fitted topic model.
///
/// Reads the saved document × topic proportions, clusters the topics by
/// their correlation structure (Ward's linkage), and draws the cluster tree
/// next to per-publication coverage bars, aligned on one topic axis.
#[derive(Parser)]
#[command(name = "trellis", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the chart image
    Render {
        /// Number of background cluster bands (overrides TRELLIS_BANDS)
        #[arg(long)]
        bands: Option<usize>,
    },

    /// Load and validate the artifact, print a summary
    Inspect,

    /// Print the computed leaf order and cluster membership without rendering
    Order {
        /// Number of cluster groups (overrides TRELLIS_BANDS)
        #[arg(long)]
        bands: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trellis=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { bands } => {
            let config = Config::load()?;
            config.require_artifact()?;
            let band_count = bands.unwrap_or(config.band_count);

            let outcome = trellis::pipeline::run(&config, band_count)?;

            trellis::output::terminal::display_leaf_order(&outcome.model);
            println!(
                "\n{}",
                format!("Chart written to: {}", outcome.image_path.display()).bold()
            );
        }

        Commands::Inspect => {
            let config = Config::load()?;
            config.require_artifact()?;
            let artifact = TopicArtifact::load(&config.artifact_path)?;
            trellis::output::terminal::display_artifact(&artifact, &config.catchall_label);
        }

        Commands::Order { bands } => {
            let config = Config::load()?;
            config.require_artifact()?;
            let artifact = TopicArtifact::load(&config.artifact_path)?;
            let band_count = bands.unwrap_or(config.band_count);

            let model =
                trellis::pipeline::prepare(&artifact, &config.catchall_label, band_count)?;
            trellis::output::terminal::display_leaf_order(&model);
        }
    }

    Ok(())
}
