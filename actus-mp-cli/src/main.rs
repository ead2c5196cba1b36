//! actus-mp - ACTUS code generator entry point

use actus_mp_cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(cli.log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let report = run(&cli)?;

    for failure in &report.failures {
        tracing::error!(kind = %failure.kind, entity = %failure.entity, "{}", failure.error);
    }
    if !report.is_success() {
        anyhow::bail!("{} generation units failed", report.failures.len());
    }

    Ok(())
}
