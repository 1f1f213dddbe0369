//! NEO explorer binary
//!
//! Run with: cargo run -p neo-cli --bin neo -- query --limit 5

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neo_db=info,neo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(&cli)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - NEO file: {}", config.data.neo_path.display());
    tracing::info!("  - Close-approach file: {}", config.data.cad_path.display());

    let db = commands::build_database(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Inspect(args) => commands::inspect(&db, args, &mut out)?,
        Command::Query(args) => commands::query(&db, args, &config, &mut out)?,
    }

    Ok(())
}
