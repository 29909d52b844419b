//! One promo run, start to finish.
//!
//! Sequential per team: fetch → normalize → evaluate → accumulate. After
//! the last team the notification gate inspects the aggregate count. No
//! state survives the run.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::TeamConfig;
use crate::error::Error;
use crate::game::{self, GameSummary};
use crate::notify::{self, Dispatcher, NotifyOutcome, RecipientSource};
use crate::promo::{self, PromotionResult};
use crate::provider::GameDataProvider;
use crate::report::{RunReport, RunReportBuilder};

/// Result of a completed run: the report plus what the gate did with it.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub notification: NotifyOutcome,
}

/// Owns the collaborator handles for one run.
pub struct Runner {
    provider: Arc<dyn GameDataProvider>,
    recipients: Arc<dyn RecipientSource>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
}

impl Runner {
    pub fn new(
        provider: Arc<dyn GameDataProvider>,
        recipients: Arc<dyn RecipientSource>,
        dispatcher: Option<Arc<dyn Dispatcher>>,
    ) -> Self {
        Self {
            provider,
            recipients,
            dispatcher,
        }
    }

    /// Evaluate every configured team for one date, build the report, and
    /// run the notification gate.
    pub async fn run(&self, teams: &[TeamConfig], date: NaiveDate) -> Result<RunOutcome, Error> {
        info!(%date, teams = teams.len(), "Starting promo run");

        let mut builder = RunReportBuilder::new(date);
        for team in teams {
            let (summary, results) = self.evaluate_team(team, date).await?;
            builder.push_team(&team.display_name, summary, results);
        }
        let report = builder.build();

        let notification = notify::notify(
            &report,
            self.recipients.as_ref(),
            self.dispatcher.as_deref(),
        )
        .await?;

        Ok(RunOutcome {
            report,
            notification,
        })
    }

    async fn evaluate_team(
        &self,
        team: &TeamConfig,
        date: NaiveDate,
    ) -> Result<(GameSummary, Vec<PromotionResult>), Error> {
        let schedule = self.provider.fetch_schedule(team.team_id, date).await?;

        // The schedule alone supports the win/score rules, so a failed
        // boxscore lookup degrades to the partial-data path instead of
        // losing the team.
        let boxscore = match game::scheduled_game_pk(&schedule, team.team_id) {
            Some(game_pk) => match self.provider.fetch_boxscore(game_pk).await {
                Ok(boxscore) => boxscore,
                Err(e) => {
                    warn!(team = %team.display_name, error = %e, "Boxscore fetch failed");
                    None
                }
            },
            None => None,
        };

        let summary = game::normalize(&schedule, boxscore.as_ref(), team.team_id);
        let results = promo::evaluate(&summary, &team.rules);

        let triggered = results.iter().filter(|r| r.triggered).count();
        info!(
            team = %team.display_name,
            played = summary.played,
            triggered,
            "Team evaluated"
        );
        Ok((summary, results))
    }
}
