//! Weekly report data and text rendering.

use serde::Serialize;

use super::window::LastWeek;
use crate::error::ReqlensError;

const RULE_WIDTH: usize = 60;

/// A page listed under "Top Priority Pages".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPage {
    pub title: String,
    pub author: String,
    /// First 10 characters of the modification timestamp.
    pub modified: String,
    pub link: String,
}

/// Pages that passed the last-week filter.
#[derive(Debug, Clone, Serialize)]
pub struct LastWeekPages {
    pub modified: usize,
    pub top_pages: Vec<TopPage>,
}

/// Outcome of the page listing and date filter.
///
/// `last_week` is `None` when the listing succeeded but filtering failed.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub total_found: usize,
    pub last_week: Option<LastWeekPages>,
}

impl PageSummary {
    pub fn listed(total_found: usize) -> Self {
        Self {
            total_found,
            last_week: None,
        }
    }
}

/// Comment count for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageComments {
    pub title: String,
    pub count: usize,
}

/// Comment counts for the first few fetched pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentTally {
    pub pages: Vec<PageComments>,
}

impl CommentTally {
    pub fn total(&self) -> usize {
        self.pages.iter().map(|p| p.count).sum()
    }
}

/// Failure that cut a report short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ReqlensError> for ReportFailure {
    fn from(err: &ReqlensError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Everything the weekly report gathered, including a failure if one occurred.
///
/// Sections are filled in order; a section is `None` when the run stopped
/// before reaching it.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub label: String,
    pub window: LastWeek,
    pub pages: Option<PageSummary>,
    pub comments: Option<CommentTally>,
    pub error: Option<ReportFailure>,
}

impl WeeklyReport {
    pub fn new(label: &str, window: LastWeek) -> Self {
        Self {
            label: label.to_string(),
            window,
            pages: None,
            comments: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Format the report as a human-readable string.
    pub fn to_display_string(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("Daily Request Analysis - {}\n", self.label));
        output.push_str(&format!("Date Range: {}\n", self.window.date_range_label()));
        output.push_str(&format!("{}\n", rule));

        if let Some(pages) = &self.pages {
            output.push_str(&format!("\n[API Call] {} Confluence\n", self.label));
            output.push_str(&format!("- Total Pages Found: {}\n", pages.total_found));

            if let Some(last_week) = &pages.last_week {
                output.push_str(&format!(
                    "- Pages Modified Last Week: {}\n",
                    last_week.modified
                ));

                if !last_week.top_pages.is_empty() {
                    output.push_str("\n[Top Priority Pages - Last Week]:\n");
                    for (i, page) in last_week.top_pages.iter().enumerate() {
                        output.push_str(&format!("\n### {}. {}\n", i + 1, page.title));
                        output.push_str(&format!("   - Author: {}\n", page.author));
                        output.push_str(&format!("   - Modified: {}\n", page.modified));
                        output.push_str(&format!("   - Link: {}\n", page.link));
                    }
                }
            }
        }

        if let Some(comments) = &self.comments {
            output.push_str("\n\n[Checking Comments on Pages...]\n");
            for page in comments.pages.iter().filter(|p| p.count > 0) {
                output.push_str(&format!("- {}: {} comments\n", page.title, page.count));
            }
            if self.error.is_none() {
                output.push_str(&format!("\nTotal Comments Found: {}\n", comments.total()));
            }
        }

        if let Some(failure) = &self.error {
            output.push_str(&format!("Error: {}: {}\n", failure.kind, failure.message));
        }

        output.push_str(&format!("\n{}\n", rule));
        output.push_str("Analysis Complete\n");

        output
    }
}
