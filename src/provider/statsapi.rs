//! MLB Stats API client.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::GameDataProvider;
use crate::provider::raw::{RawBoxscore, RawSchedule};

/// Default API base. Overridable for tests and mirrors.
pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// HTTP client for the MLB Stats API.
pub struct StatsApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for StatsApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl GameDataProvider for StatsApiClient {
    async fn fetch_schedule(
        &self,
        team_id: u32,
        date: NaiveDate,
    ) -> Result<RawSchedule, ProviderError> {
        let url = format!(
            "{}/schedule?sportId=1&date={}&teamId={}&hydrate=linescore",
            self.base_url, date, team_id
        );
        debug!(team_id, %date, "Fetching schedule");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::ScheduleFetch {
                team_id,
                reason: e.to_string(),
            })?;

        response
            .json::<RawSchedule>()
            .await
            .map_err(|e| ProviderError::Decode {
                endpoint: "schedule".into(),
                reason: e.to_string(),
            })
    }

    async fn fetch_boxscore(&self, game_pk: i64) -> Result<Option<RawBoxscore>, ProviderError> {
        let url = format!("{}/game/{}/boxscore", self.base_url, game_pk);
        debug!(game_pk, "Fetching boxscore");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::BoxscoreFetch {
                game_pk,
                reason: e.to_string(),
            })?;

        // The upstream 404s box scores it has not ingested yet.
        if response.status() == StatusCode::NOT_FOUND {
            debug!(game_pk, "Boxscore not available yet");
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|e| ProviderError::BoxscoreFetch {
                game_pk,
                reason: e.to_string(),
            })?;

        response
            .json::<RawBoxscore>()
            .await
            .map(Some)
            .map_err(|e| ProviderError::Decode {
                endpoint: "boxscore".into(),
                reason: e.to_string(),
            })
    }
}
