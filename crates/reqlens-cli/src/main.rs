//! reqlens CLI - request-source and Confluence weekly reports.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing on stderr so stdout carries only the report.
///
/// `RUST_LOG` wins over the default filter; `verbose` raises the default to debug.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "reqlens=debug,reqlens_core=debug"
    } else {
        "reqlens=info,reqlens_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli.execute().await
}
