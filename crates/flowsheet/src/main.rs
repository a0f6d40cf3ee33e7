//! Flowsheet CLI binary.

use anyhow::Result;
use flowsheet::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the flowsheet CLI.
///
/// Uses tokio's current_thread runtime: the run is strictly sequential and
/// the only I/O is file access and the Graphviz child processes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=flowsheet=debug cargo run -- render demo.xlsx
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowsheet=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting flowsheet CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Flowsheet CLI completed successfully");
    Ok(())
}
