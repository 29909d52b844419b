//! Game-data provider boundary — pure I/O, no business logic.

pub mod raw;
pub mod statsapi;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::provider::raw::{RawBoxscore, RawSchedule};

pub use statsapi::StatsApiClient;

/// Point lookups against the upstream game-data source.
///
/// Implementations fetch and decode; they never interpret. A date with no
/// game is an empty schedule, a not-yet-ingested box score is `None` —
/// neither is an error. Errors are reserved for transport and payload
/// failures.
#[async_trait]
pub trait GameDataProvider: Send + Sync {
    /// Fetch the schedule for one team on one date.
    async fn fetch_schedule(
        &self,
        team_id: u32,
        date: NaiveDate,
    ) -> Result<RawSchedule, ProviderError>;

    /// Fetch the box score for a game. `None` means the upstream has no
    /// box score for this game yet.
    async fn fetch_boxscore(&self, game_pk: i64) -> Result<Option<RawBoxscore>, ProviderError>;
}
