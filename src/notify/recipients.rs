//! Recipient sources — static list or a published address sheet.

use async_trait::async_trait;
use tracing::debug;

use crate::error::NotifyError;
use crate::notify::RecipientSource;

/// Fixed recipient list from configuration.
pub struct StaticRecipients {
    addresses: Vec<String>,
}

impl StaticRecipients {
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl RecipientSource for StaticRecipients {
    async fn fetch_recipients(&self) -> Result<Vec<String>, NotifyError> {
        Ok(self.addresses.clone())
    }
}

/// Recipients fetched from a published sheet export (CSV or one address per
/// line). Cells without an `@` are treated as headers or notes and skipped.
pub struct SheetRecipients {
    http: reqwest::Client,
    url: String,
}

impl SheetRecipients {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RecipientSource for SheetRecipients {
    async fn fetch_recipients(&self) -> Result<Vec<String>, NotifyError> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| NotifyError::RecipientFetch(e.to_string()))?
            .text()
            .await
            .map_err(|e| NotifyError::RecipientFetch(e.to_string()))?;

        let addresses = parse_sheet(&body);
        debug!(count = addresses.len(), "Fetched recipient sheet");
        Ok(addresses)
    }
}

/// Pull addresses out of a sheet export, preserving sheet order.
fn parse_sheet(body: &str) -> Vec<String> {
    body.lines()
        .flat_map(|line| line.split(','))
        .map(|cell| cell.trim().trim_matches('"'))
        .filter(|cell| cell.contains('@'))
        .map(str::to_string)
        .collect()
}
