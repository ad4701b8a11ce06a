//! Confluence weekly report command.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use reqlens_core::config::{
    ConfluenceSettings, Credentials, DEFAULT_COMMENT_PAGES, DEFAULT_CONFLUENCE_DOMAIN,
    DEFAULT_LABEL, DEFAULT_PAGE_LIMIT, DEFAULT_TOP_PAGES,
};
use reqlens_core::confluence::report::WeeklyReport;
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct WeeklyArgs {
    /// Wiki domain, or a full base URL with scheme
    #[arg(long, env = "MOMGLEEDU_CONFLUENCE_DOMAIN", default_value = DEFAULT_CONFLUENCE_DOMAIN)]
    pub domain: String,

    /// Account email for HTTP Basic auth
    #[arg(long, env = "CONFLUENCE_EMAIL")]
    pub email: String,

    /// API token for HTTP Basic auth
    #[arg(long, env = "CONFLUENCE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Name shown in the report header
    #[arg(long, env = "REQLENS_LABEL", default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Number of pages to list
    #[arg(long, env = "REQLENS_PAGE_LIMIT", default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,

    /// Number of last-week pages to show in detail
    #[arg(long, default_value_t = DEFAULT_TOP_PAGES)]
    pub top: usize,

    /// Number of pages to check for comments
    #[arg(long, default_value_t = DEFAULT_COMMENT_PAGES)]
    pub comment_pages: usize,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "REQLENS_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl WeeklyArgs {
    fn settings(&self) -> reqlens_core::ReqlensResult<ConfluenceSettings> {
        let credentials = Credentials::new(&self.email, &self.api_token)?;
        let mut settings = ConfluenceSettings::new(&self.domain, credentials)?;
        settings.label = self.label.clone();
        settings.page_limit = self.limit;
        settings.top_pages = self.top;
        settings.comment_pages = self.comment_pages;
        settings.timeout = self.timeout.map(Duration::from_secs);
        Ok(settings)
    }
}

pub async fn execute(args: WeeklyArgs) -> Result<()> {
    let settings = args.settings()?;
    debug!(
        base_url = %settings.base_url,
        page_limit = settings.page_limit,
        comment_pages = settings.comment_pages,
        "Resolved weekly settings"
    );
    let now = chrono::Local::now().fixed_offset();

    let report = reqlens_core::confluence::build_weekly_report(&settings, now).await;

    if !write_report(&report, args.json, &mut std::io::stdout().lock())? {
        if let Some(failure) = &report.error {
            output::print_failure(failure.kind, &failure.message)?;
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Write the report as text or JSON. Returns `false` when the run failed.
fn write_report<W: Write>(report: &WeeklyReport, json: bool, out: &mut W) -> Result<bool> {
    if json {
        output::write_json(out, report)?;
    } else {
        out.write_all(report.to_display_string().as_bytes())?;
    }
    out.flush()?;
    Ok(report.is_success())
}
