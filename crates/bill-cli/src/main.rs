//! # qiwi-bill
//!
//! Issue, inspect and reject QIWI bills from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export QIWI_KEY=eyJ2ZXJzaW9uIjoi...
//!
//! qiwi-bill issue --amount 100 --currency RUB --hours 2
//! qiwi-bill status cc961e8d-d4d6-4f02-b737-2297e51fb48e
//! qiwi-bill cancel cc961e8d-d4d6-4f02-b737-2297e51fb48e
//! ```

use bill_cli::{cli::Cli, commands};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let layer = fmt::layer().with_writer(std::io::stderr);

    if cli.log_json {
        tracing_subscriber::registry()
            .with(layer.json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry().with(layer).with(filter).init();
    }

    let output = commands::run(cli).await?;
    println!("{output}");

    Ok(())
}
