use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use road_snap::directions::{DirectionsClient, DirectionsConfig, StraightLine};
use road_snap::polyline;
use road_snap::segments::{snap_segments, InfraSegment, SnapOptions};
use road_snap::traits::RoadSnapper;

#[derive(Parser)]
#[command(name = "road-snap")]
#[command(about = "Pre-compute road-following geometry for damaged segments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snap every segment in a JSON file to the road network
    Snap {
        /// JSON array of segments
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the id -> path map
        #[arg(short, long)]
        output: PathBuf,

        /// Pause between directions requests
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Skip the directions API and store straight lines
        #[arg(long)]
        offline: bool,
    },
    /// Decode one encoded polyline and print its points and midpoint
    Decode { encoded: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snap {
            input,
            output,
            delay_ms,
            offline,
        } => {
            let segments: Vec<InfraSegment> = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let options = SnapOptions {
                delay: Duration::from_millis(delay_ms),
            };

            let snapper: Box<dyn RoadSnapper> = if offline {
                Box::new(StraightLine)
            } else {
                Box::new(DirectionsClient::new(DirectionsConfig::from_env()?)?)
            };

            let snapped = snap_segments(&segments, snapper.as_ref(), &options);
            fs::write(&output, serde_json::to_string_pretty(&snapped)?)?;
            info!(paths = snapped.len(), output = %output.display(), "saved snapped paths");
        }
        Commands::Decode { encoded } => {
            let path = polyline::decode(&encoded)?;
            let body = json!({
                "points": path,
                "midpoint": path.midpoint(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
