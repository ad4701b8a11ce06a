//! Confluence weekly report.
//!
//! Lists recent wiki pages, keeps the ones modified last week and counts
//! comments on the first few pages. The run stops at the first failure but
//! keeps whatever it gathered before it.

pub mod model;
pub mod report;
pub mod window;

use chrono::{DateTime, FixedOffset};
use serde::de::IgnoredAny;
use tracing::{debug, info, warn};

use crate::client::JsonClient;
use crate::config::ConfluenceSettings;
use crate::error::{ReqlensError, ReqlensResult};
use crate::text::take_chars;
use model::{ConfluencePage, ContentList};
use report::{
    CommentTally, LastWeekPages, PageComments, PageSummary, ReportFailure, TopPage, WeeklyReport,
};
use window::{parse_timestamp, LastWeek};

const NOT_AVAILABLE: &str = "N/A";

/// Authenticated access to the wiki content endpoints.
pub struct ConfluenceApi<'a> {
    client: JsonClient,
    settings: &'a ConfluenceSettings,
}

impl<'a> ConfluenceApi<'a> {
    pub fn new(settings: &'a ConfluenceSettings) -> Self {
        Self {
            client: JsonClient::new(settings.timeout).with_basic_auth(&settings.credentials),
            settings,
        }
    }

    /// List pages with their last-update metadata expanded.
    pub async fn list_pages(&self) -> ReqlensResult<Vec<ConfluencePage>> {
        let url = self.settings.content_url();
        let limit = self.settings.page_limit.to_string();
        let list: ContentList<ConfluencePage> = self
            .client
            .get_json(
                &url,
                &[
                    ("limit", limit.as_str()),
                    ("type", "page"),
                    ("expand", "history.lastUpdated"),
                ],
            )
            .await?;

        info!(pages = list.results.len(), "Listed wiki pages");
        Ok(list.results)
    }

    /// Number of comments directly under a page.
    pub async fn comment_count(&self, page_id: &str) -> ReqlensResult<usize> {
        let url = format!("{}/{}/child/comment", self.settings.content_url(), page_id);
        let list: ContentList<IgnoredAny> = self.client.get_json(&url, &[]).await?;
        debug!(page_id = %page_id, comments = list.results.len(), "Counted comments");
        Ok(list.results.len())
    }
}

/// Pages whose last update falls inside `window`, in fetch order.
///
/// Pages without a timestamp are skipped. An unreadable timestamp fails the
/// whole selection; `source_url` names the listing it came from.
pub fn select_last_week<'p>(
    pages: &'p [ConfluencePage],
    window: &LastWeek,
    source_url: &str,
) -> ReqlensResult<Vec<&'p ConfluencePage>> {
    let mut selected = Vec::new();

    for page in pages {
        let Some(when) = page.last_updated_when() else {
            continue;
        };
        let updated = parse_timestamp(when).ok_or_else(|| {
            ReqlensError::malformed(
                source_url,
                format!(
                    "page {} has unreadable lastUpdated timestamp {:?}",
                    page.id.as_deref().unwrap_or(NOT_AVAILABLE),
                    when
                ),
            )
        })?;
        if window.contains(updated) {
            selected.push(page);
        }
    }

    Ok(selected)
}

/// Last-week count plus the first `settings.top_pages` hits.
pub fn summarize_last_week(
    pages: &[ConfluencePage],
    window: &LastWeek,
    settings: &ConfluenceSettings,
) -> ReqlensResult<LastWeekPages> {
    let selected = select_last_week(pages, window, &settings.content_url())?;

    let top_pages = selected
        .iter()
        .take(settings.top_pages)
        .map(|page| TopPage {
            title: page.title.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
            author: page.last_updated_by().unwrap_or(NOT_AVAILABLE).to_string(),
            modified: take_chars(page.last_updated_when().unwrap_or(NOT_AVAILABLE), 10)
                .to_string(),
            link: settings.page_link(page.webui().unwrap_or_default()),
        })
        .collect();

    Ok(LastWeekPages {
        modified: selected.len(),
        top_pages,
    })
}

/// Run the weekly report against the wiki.
///
/// Never fails: the first error is recorded on the report and the sections
/// gathered before it are kept.
pub async fn build_weekly_report(
    settings: &ConfluenceSettings,
    now: DateTime<FixedOffset>,
) -> WeeklyReport {
    let window = LastWeek::preceding(now);
    let mut report = WeeklyReport::new(&settings.label, window);
    info!(
        base_url = %settings.base_url,
        range = %window.date_range_label(),
        "Building weekly report"
    );

    let api = ConfluenceApi::new(settings);

    let pages = match api.list_pages().await {
        Ok(pages) => pages,
        Err(e) => return fail(report, e),
    };

    let mut summary = PageSummary::listed(pages.len());
    match summarize_last_week(&pages, &window, settings) {
        Ok(last_week) => {
            summary.last_week = Some(last_week);
            report.pages = Some(summary);
        }
        Err(e) => {
            report.pages = Some(summary);
            return fail(report, e);
        }
    }

    let mut tally = CommentTally::default();
    for page in pages.iter().take(settings.comment_pages) {
        let Some(id) = page.id.as_deref() else {
            warn!(title = ?page.title, "Page has no id, skipping comment check");
            continue;
        };
        match api.comment_count(id).await {
            Ok(count) => tally.pages.push(PageComments {
                title: page.title.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
                count,
            }),
            Err(e) => {
                report.comments = Some(tally);
                return fail(report, e);
            }
        }
    }
    report.comments = Some(tally);

    report
}

fn fail(mut report: WeeklyReport, err: ReqlensError) -> WeeklyReport {
    warn!(kind = err.kind(), error = %err, "Weekly report stopped early");
    report.error = Some(ReportFailure::from(&err));
    report
}
