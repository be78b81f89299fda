//! Programs feed client
//!
//! Fetches the published spreadsheet list feed and maps each row to a
//! [`Program`]. Rows are read from `feed.entry[]`, each column being an
//! object `{"$t": "..."}` under a `gsx$<column>` key.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Localized, Program};

/// Feed error types
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Programs feed client
#[derive(Debug, Clone)]
pub struct FeedClient {
    url: String,
    client: reqwest::Client,
}

impl FeedClient {
    /// Create a client for the given feed endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and map every program row
    pub async fn fetch(&self) -> Result<Vec<Program>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                parse_feed(&body)
            }
            status => Err(FeedError::Status(status.as_u16())),
        }
    }
}

/// Parse a feed document, treating a missing wrapper as schema drift
pub fn parse_feed(body: &str) -> Result<Vec<Program>, FeedError> {
    let document: FeedDocument = serde_json::from_str(body)
        .map_err(|e| FeedError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let entries = document
        .feed
        .ok_or_else(|| FeedError::InvalidResponse("missing `feed` object".into()))?
        .entry
        .ok_or_else(|| FeedError::InvalidResponse("missing `feed.entry` list".into()))?;

    Ok(entries.into_iter().map(EntryRaw::into_program).collect())
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct FeedDocument {
    feed: Option<FeedBody>,
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    entry: Option<Vec<EntryRaw>>,
}

#[derive(Debug, Default, Deserialize)]
struct Cell {
    #[serde(rename = "$t")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EntryRaw {
    #[serde(rename = "gsx$title_tr")]
    title_tr: Option<Cell>,
    #[serde(rename = "gsx$title_en")]
    title_en: Option<Cell>,
    #[serde(rename = "gsx$title_ar")]
    title_ar: Option<Cell>,
    #[serde(rename = "gsx$description_tr")]
    description_tr: Option<Cell>,
    #[serde(rename = "gsx$description_en")]
    description_en: Option<Cell>,
    #[serde(rename = "gsx$description_ar")]
    description_ar: Option<Cell>,
    #[serde(rename = "gsx$image_url")]
    image_url: Option<Cell>,
}

/// Cell text, or `default` when the column is absent or blank
fn cell_or(cell: Option<Cell>, default: &str) -> String {
    cell.and_then(|c| c.text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl EntryRaw {
    fn into_program(self) -> Program {
        Program {
            title: Localized {
                tr: cell_or(self.title_tr, "Başlık Yok"),
                en: cell_or(self.title_en, "No Title"),
                ar: cell_or(self.title_ar, "بدون عنوان"),
            },
            description: Localized {
                tr: cell_or(self.description_tr, "Açıklama mevcut değil."),
                en: cell_or(self.description_en, "No description available."),
                ar: cell_or(self.description_ar, "لا يوجد وصف متاح."),
            },
            image_url: cell_or(self.image_url, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry_gets_defaults() {
        let program = EntryRaw::default().into_program();
        assert_eq!(program.title.tr, "Başlık Yok");
        assert_eq!(program.title.en, "No Title");
        assert_eq!(program.title.ar, "بدون عنوان");
        assert_eq!(program.description.en, "No description available.");
        assert_eq!(program.image_url, "");
    }

    #[test]
    fn test_blank_cell_counts_as_missing() {
        let body = r#"{"feed":{"entry":[{"gsx$title_en":{"$t":""},"gsx$title_tr":{"$t":"Su Kuyusu"}}]}}"#;
        let programs = parse_feed(body).unwrap();
        assert_eq!(programs[0].title.tr, "Su Kuyusu");
        assert_eq!(programs[0].title.en, "No Title");
    }

    #[test]
    fn test_schema_drift_is_an_error() {
        assert!(matches!(
            parse_feed(r#"{"values": []}"#),
            Err(FeedError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_feed(r#"{"feed": {}}"#),
            Err(FeedError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_feed("<html>"),
            Err(FeedError::InvalidResponse(_))
        ));
    }
}
