//! Request-source analysis.
//!
//! Tallies collected requests by their `source` tag and splits the
//! Confluence-sourced ones by the wiki they link to.

pub mod model;

use serde::Serialize;
use tracing::info;

use crate::client::JsonClient;
use crate::config::RequestsSettings;
use crate::error::ReqlensResult;
use crate::text::take_chars;
use model::{ClassifiedRequest, ConfluenceOrigin, RequestRecord, RequestsPayload};

const TITLE_CHARS: usize = 50;
const URL_CHARS: usize = 100;

/// Number of records carrying one source tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

/// Per-source counts in first-seen order.
pub fn tally_sources(records: &[RequestRecord]) -> Vec<SourceCount> {
    let mut counts: Vec<SourceCount> = Vec::new();

    for record in records {
        let source = record.source_or_unknown();
        match counts.iter_mut().find(|c| c.source == source) {
            Some(entry) => entry.count += 1,
            None => counts.push(SourceCount {
                source: source.to_string(),
                count: 1,
            }),
        }
    }

    counts
}

/// Classification of the Confluence-sourced subset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfluenceBreakdown {
    pub entries: Vec<ClassifiedRequest>,
    pub fanlight: usize,
    pub momgleedu: usize,
    pub unknown: usize,
}

impl ConfluenceBreakdown {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify every record whose source is exactly `confluence`.
pub fn classify_confluence(records: &[RequestRecord]) -> ConfluenceBreakdown {
    let mut breakdown = ConfluenceBreakdown::default();

    for record in records.iter().filter(|r| r.is_confluence()) {
        let classified = ClassifiedRequest::from_record(record);
        match classified.origin {
            ConfluenceOrigin::Fanlight => breakdown.fanlight += 1,
            ConfluenceOrigin::Momgleedu => breakdown.momgleedu += 1,
            ConfluenceOrigin::Unknown => breakdown.unknown += 1,
        }
        breakdown.entries.push(classified);
    }

    breakdown
}

/// Full result of one analyzer run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub sources: Vec<SourceCount>,
    /// Total as asserted by the endpoint, not recomputed.
    pub total: u64,
    pub confluence: ConfluenceBreakdown,
}

impl SourceReport {
    pub fn from_payload(payload: &RequestsPayload) -> Self {
        Self {
            sources: tally_sources(&payload.data),
            total: payload.total,
            confluence: classify_confluence(&payload.data),
        }
    }

    /// Format the report as a human-readable string.
    pub fn to_display_string(&self) -> String {
        let mut output = String::new();

        output.push_str("=== Source Breakdown ===\n");
        for entry in &self.sources {
            output.push_str(&format!("{}: {}\n", entry.source, entry.count));
        }
        output.push_str(&format!("\nTotal: {}\n", self.total));

        if self.confluence.is_empty() {
            return output;
        }

        output.push_str(&format!(
            "\n=== Confluence Breakdown ({} total) ===\n",
            self.confluence.total()
        ));
        for entry in &self.confluence.entries {
            output.push_str(&entry_line(entry));
            output.push('\n');
        }

        output.push_str("\n=== Summary ===\n");
        output.push_str(&format!("Fanlight: {}\n", self.confluence.fanlight));
        output.push_str(&format!("Momgleedu: {}\n", self.confluence.momgleedu));
        output.push_str(&format!("Unknown: {}\n", self.confluence.unknown));
        output.push_str(&format!("Total Confluence: {}\n", self.confluence.total()));

        output
    }
}

fn entry_line(entry: &ClassifiedRequest) -> String {
    match entry.origin {
        ConfluenceOrigin::Fanlight | ConfluenceOrigin::Momgleedu => {
            let title = entry.title.as_deref().unwrap_or("No title");
            format!("{}: {}...", entry.origin.label(), take_chars(title, TITLE_CHARS))
        }
        ConfluenceOrigin::Unknown => {
            format!("Unknown: {}...", take_chars(&entry.url, URL_CHARS))
        }
    }
}

/// Fetch the request collection from the configured endpoint.
pub async fn fetch_requests(
    client: &JsonClient,
    settings: &RequestsSettings,
) -> ReqlensResult<RequestsPayload> {
    let payload: RequestsPayload = client.get_json(&settings.url, &[]).await?;
    info!(records = payload.data.len(), total = payload.total, "Fetched requests");
    Ok(payload)
}

/// Fetch and analyze in one step.
pub async fn analyze(settings: &RequestsSettings) -> ReqlensResult<SourceReport> {
    let client = JsonClient::new(settings.timeout);
    let payload = fetch_requests(&client, settings).await?;
    Ok(SourceReport::from_payload(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: Option<&str>, url: Option<&str>, title: Option<&str>) -> RequestRecord {
        RequestRecord {
            source: source.map(String::from),
            original_url: url.map(String::from),
            channel_name: None,
            title: title.map(String::from),
        }
    }

    #[test]
    fn test_tally_first_seen_order() {
        let records = vec![
            record(Some("slack"), None, None),
            record(Some("confluence"), None, None),
            record(None, None, None),
            record(Some("slack"), None, None),
            record(Some("figma"), None, None),
        ];
        let counts = tally_sources(&records);
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.source.as_str(), c.count))
            .collect();
        assert_eq!(
            pairs,
            vec![("slack", 2), ("confluence", 1), ("unknown", 1), ("figma", 1)]
        );
        let sum: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(sum, records.len());
    }

    #[test]
    fn test_null_source_is_unknown() {
        let payload: RequestsPayload =
            serde_json::from_str(r#"{"data":[{"source":null},{}],"total":2}"#).unwrap();
        let counts = tally_sources(&payload.data);
        assert_eq!(
            counts,
            vec![SourceCount {
                source: "unknown".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            ConfluenceOrigin::from_url("https://FANLIGHT.example/x"),
            ConfluenceOrigin::Fanlight
        );
        assert_eq!(
            ConfluenceOrigin::from_url("https://Momgle-Edu.atlassian.net/wiki"),
            ConfluenceOrigin::Momgleedu
        );
        assert_eq!(
            ConfluenceOrigin::from_url("https://other.atlassian.net"),
            ConfluenceOrigin::Unknown
        );
        // fanlight wins when both appear
        assert_eq!(
            ConfluenceOrigin::from_url("https://fanlight.io/momgle"),
            ConfluenceOrigin::Fanlight
        );
    }

    #[test]
    fn test_buckets_are_exhaustive() {
        let records = vec![
            record(Some("confluence"), Some("https://a.fanlight.io"), None),
            record(Some("confluence"), Some("https://momgle-edu.net"), None),
            record(Some("confluence"), None, None),
            record(Some("Confluence"), Some("https://a.fanlight.io"), None),
            record(Some("slack"), Some("https://a.fanlight.io"), None),
        ];
        let breakdown = classify_confluence(&records);
        assert_eq!(breakdown.total(), 3);
        assert_eq!(
            breakdown.fanlight + breakdown.momgleedu + breakdown.unknown,
            breakdown.total()
        );
        assert_eq!(breakdown.fanlight, 1);
        assert_eq!(breakdown.momgleedu, 1);
        assert_eq!(breakdown.unknown, 1);
    }

    #[test]
    fn test_long_title_truncation() {
        let title = "T".repeat(60);
        let records = vec![record(
            Some("confluence"),
            Some("https://fanlight.io/p"),
            Some(&title),
        )];
        let report = SourceReport::from_payload(&RequestsPayload {
            data: records,
            total: 1,
        });
        let text = report.to_display_string();
        let expected = format!("Fanlight: {}...\n", "T".repeat(50));
        assert!(text.contains(&expected));
        assert!(!text.contains(&"T".repeat(51)));
    }

    #[test]
    fn test_unknown_line_shows_lowercased_url() {
        let long_url = format!("https://Wiki.Example/{}", "A".repeat(120));
        let records = vec![
            record(Some("confluence"), Some(&long_url), Some("ignored")),
            record(Some("confluence"), Some("https://momgle.net/x"), None),
        ];
        let report = SourceReport::from_payload(&RequestsPayload {
            data: records,
            total: 2,
        });
        let text = report.to_display_string();

        let lowered = long_url.to_lowercase();
        assert!(text.contains(&format!("Unknown: {}...\n", &lowered[..100])));
        assert!(text.contains("Momgleedu: No title...\n"));
    }

    #[test]
    fn test_end_to_end_rendering() {
        let payload: RequestsPayload = serde_json::from_str(
            r#"{"data":[{"source":"confluence","originalUrl":"https://x.fanlight.io/p"},{"source":"slack"}],"total":2}"#,
        )
        .unwrap();
        let text = SourceReport::from_payload(&payload).to_display_string();

        let expected = "\
=== Source Breakdown ===
confluence: 1
slack: 1

Total: 2

=== Confluence Breakdown (1 total) ===
Fanlight: No title...

=== Summary ===
Fanlight: 1
Momgleedu: 0
Unknown: 0
Total Confluence: 1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_confluence_section_when_absent() {
        let payload: RequestsPayload =
            serde_json::from_str(r#"{"data":[{"source":"slack"}],"total":1}"#).unwrap();
        let text = SourceReport::from_payload(&payload).to_display_string();
        assert_eq!(text, "=== Source Breakdown ===\nslack: 1\n\nTotal: 1\n");
    }

    #[test]
    fn test_json_shape() {
        let payload: RequestsPayload = serde_json::from_str(
            r#"{"data":[
                {"source":"confluence","originalUrl":"https://X.Fanlight.io/p","channelName":"PM-Desk","title":"Banner copy"},
                {"source":"slack"}
            ],"total":2}"#,
        )
        .unwrap();
        let value = serde_json::to_value(SourceReport::from_payload(&payload)).unwrap();

        assert_eq!(value["total"], 2);
        assert_eq!(value["sources"][0]["source"], "confluence");
        assert_eq!(value["sources"][0]["count"], 1);
        assert_eq!(value["sources"][1]["source"], "slack");

        let confluence = &value["confluence"];
        assert_eq!(confluence["fanlight"], 1);
        assert_eq!(confluence["momgleedu"], 0);
        assert_eq!(confluence["unknown"], 0);
        let entry = &confluence["entries"][0];
        assert_eq!(entry["origin"], "fanlight");
        assert_eq!(entry["title"], "Banner copy");
        assert_eq!(entry["url"], "https://x.fanlight.io/p");
        assert_eq!(entry["channel"], "pm-desk");
    }

    #[test]
    fn test_missing_total_is_rejected() {
        let parsed = serde_json::from_str::<RequestsPayload>(r#"{"data":[]}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_analyze_against_local_endpoint() {
        use axum::{routing::get, Json, Router};

        let app = Router::new()
            .route(
                "/api/requests",
                get(|| async {
                    Json(serde_json::json!({
                        "data": [
                            {"source": "slack", "title": "Login bug"},
                            {"source": "confluence", "originalUrl": "https://momgle-edu.atlassian.net/wiki/x", "title": "Curriculum"},
                            {"source": "slack"}
                        ],
                        "total": 3
                    }))
                }),
            )
            .route("/api/broken", get(|| async { Json(serde_json::json!({"items": []})) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let settings = RequestsSettings {
            url: format!("http://{}/api/requests", addr),
            timeout: None,
        };
        let report = analyze(&settings).await.unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.sources[0].source, "slack");
        assert_eq!(report.sources[0].count, 2);
        assert_eq!(report.confluence.momgleedu, 1);

        let settings = RequestsSettings {
            url: format!("http://{}/api/broken", addr),
            timeout: None,
        };
        let err = analyze(&settings).await.unwrap_err();
        assert_eq!(err.kind(), "malformed response");
    }
}
