// Build full_visual_metadata.csv from the species list, the training
// manifest and the two leaf trait maps.
//
// Usage: cargo run --release --bin prepare_visual_metadata
// (run from the dataset root; RUST_LOG overrides the log level)

use plant_visual_metadata::{report_failure, run, PrepConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plant_visual_metadata=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("--- Starting visual metadata preparation ---");

    let config = PrepConfig::default();

    match run(&config) {
        Ok(summary) => {
            tracing::info!(
                "--- Finished: {} rows ({} herbarium, {} field) ---",
                summary.rows,
                summary.domain_count("herbarium"),
                summary.domain_count("field")
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_failure(err),
    }
}
