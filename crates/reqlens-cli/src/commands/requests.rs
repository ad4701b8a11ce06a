//! Request-source breakdown command.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use reqlens_core::config::{RequestsSettings, DEFAULT_REQUESTS_URL};
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct RequestsArgs {
    /// Endpoint serving `{ data: [...], total }`
    #[arg(long, env = "REQLENS_REQUESTS_URL", default_value = DEFAULT_REQUESTS_URL)]
    pub url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "REQLENS_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: RequestsArgs) -> Result<()> {
    let settings = RequestsSettings {
        url: args.url,
        timeout: args.timeout.map(Duration::from_secs),
    };
    debug!(url = %settings.url, timeout = ?settings.timeout, "Resolved requests settings");

    let report = reqlens_core::requests::analyze(&settings)
        .await
        .with_context(|| format!("Failed to analyze requests from {}", settings.url))?;

    if args.json {
        output::print_json(&report)?;
    } else {
        print!("{}", report.to_display_string());
    }

    Ok(())
}
