//! Request record models.

use serde::{Deserialize, Serialize};

/// Tag used when a record carries no `source`.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One collected customer request, as served by the requests endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RequestRecord {
    /// Source tag, falling back to `"unknown"` when absent or null.
    pub fn source_or_unknown(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    pub fn is_confluence(&self) -> bool {
        self.source.as_deref() == Some("confluence")
    }
}

/// Top-level body of the requests endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestsPayload {
    pub data: Vec<RequestRecord>,
    pub total: u64,
}

/// Which wiki a Confluence-sourced request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfluenceOrigin {
    Fanlight,
    Momgleedu,
    Unknown,
}

impl ConfluenceOrigin {
    /// Classify by case-insensitive substring match on the original URL.
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("fanlight") {
            Self::Fanlight
        } else if url.contains("momgle") {
            Self::Momgleedu
        } else {
            Self::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fanlight => "Fanlight",
            Self::Momgleedu => "Momgleedu",
            Self::Unknown => "Unknown",
        }
    }
}

/// A Confluence-sourced request after classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRequest {
    pub origin: ConfluenceOrigin,
    pub title: Option<String>,
    /// Lower-cased `originalUrl`, empty when missing.
    pub url: String,
    /// Lower-cased `channelName`, empty when missing.
    pub channel: String,
}

impl ClassifiedRequest {
    pub fn from_record(record: &RequestRecord) -> Self {
        let url = record
            .original_url
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let channel = record
            .channel_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        Self {
            origin: ConfluenceOrigin::from_url(&url),
            title: record.title.clone(),
            url,
            channel,
        }
    }
}
