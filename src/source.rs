use std::path::Path;

use anyhow::Context;
use reqwest::Client;

use crate::models::RawRecord;

/// Default opensheet endpoint for the registration sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://opensheet.elk.sh/1rUvQMoxTSlOGs235x3ZjwjhJ5fJWjUBNa3fzYbAX2fg/Sheet1";

pub struct SheetClient {
    client: Client,
    url: String,
}

impl SheetClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Fetches the current registration rows. The endpoint answers with a
    /// JSON array of flat string-keyed row objects; a row that does not fit
    /// the record shape is skipped with a diagnostic, never a batch failure.
    pub async fn fetch_records(&self) -> anyhow::Result<Vec<RawRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("sheet endpoint returned {status}: {body}");
        }

        let rows = response
            .json::<Vec<serde_json::Value>>()
            .await
            .context("sheet endpoint did not return a JSON array of rows")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<RawRecord>(row) {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("skipping malformed sheet row: {err}"),
            }
        }

        log::info!("fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }
}

/// Reads records from a CSV export of the sheet, for offline runs. Headers
/// follow the API field names; missing columns default to empty strings.
pub fn load_csv(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => log::warn!("skipping malformed csv row: {err}"),
        }
    }

    Ok(records)
}
