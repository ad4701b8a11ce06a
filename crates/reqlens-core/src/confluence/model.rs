//! Confluence REST content models.
//!
//! Only the fields the weekly report reads are modelled; every nested field
//! is optional because the API omits what was not expanded.

use serde::{Deserialize, Deserializer, Serialize};

/// `results` envelope shared by the content endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A wiki page with `history.lastUpdated` expanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfluencePage {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub history: Option<PageHistory>,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageHistory {
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<PageVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageVersion {
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub by: Option<WikiUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiUser {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub webui: Option<String>,
}

impl ConfluencePage {
    fn last_updated(&self) -> Option<&PageVersion> {
        self.history.as_ref()?.last_updated.as_ref()
    }

    /// Raw `history.lastUpdated.when`, `None` when missing or empty.
    pub fn last_updated_when(&self) -> Option<&str> {
        self.last_updated()?
            .when
            .as_deref()
            .filter(|when| !when.is_empty())
    }

    pub fn last_updated_by(&self) -> Option<&str> {
        self.last_updated()?.by.as_ref()?.display_name.as_deref()
    }

    pub fn webui(&self) -> Option<&str> {
        self.links.as_ref()?.webui.as_deref()
    }
}

// Page ids are strings on Atlassian Cloud; some deployments send numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
