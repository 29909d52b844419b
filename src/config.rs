//! Run configuration.
//!
//! Teams and their promotion rules are configuration data, not code: they
//! load once at startup from a JSON file (or fall back to the built-in
//! defaults) and are never mutated. Everything else comes from environment
//! variables, with optional pieces disabled by absence.

use std::path::Path;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notify::SmtpConfig;
use crate::promo::{PromotionRule, Trigger};
use crate::provider::statsapi::DEFAULT_BASE_URL;

/// One followed team: provider id, display name, ordered promotion rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub team_id: u32,
    pub display_name: String,
    pub rules: Vec<PromotionRule>,
}

/// Where the recipient list comes from.
#[derive(Debug, Clone)]
pub enum RecipientsSpec {
    /// Addresses straight from configuration.
    List(Vec<String>),
    /// Published sheet export to fetch at send time.
    SheetUrl(String),
    /// Nothing configured.
    None,
}

/// Everything one run needs, assembled at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub teams: Vec<TeamConfig>,
    /// Explicit run date; `None` means yesterday's games.
    pub date: Option<NaiveDate>,
    pub statsapi_base_url: String,
    /// `None` disables dispatch; the report still goes to stdout.
    pub smtp: Option<SmtpConfig>,
    pub recipients: RecipientsSpec,
}

impl AppConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let teams = match std::env::var("PROMO_TEAMS_FILE") {
            Ok(path) => load_teams_file(Path::new(&path))?,
            Err(_) => default_teams(),
        };

        let date = match std::env::var("PROMO_DATE") {
            Ok(raw) => Some(parse_date(&raw)?),
            Err(_) => None,
        };

        let statsapi_base_url =
            std::env::var("STATSAPI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let recipients = if let Ok(list) = std::env::var("PROMO_RECIPIENTS") {
            RecipientsSpec::List(
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            )
        } else if let Ok(url) = std::env::var("PROMO_RECIPIENTS_URL") {
            RecipientsSpec::SheetUrl(url)
        } else {
            RecipientsSpec::None
        };

        Ok(Self {
            teams,
            date,
            statsapi_base_url,
            smtp: SmtpConfig::from_env(),
            recipients,
        })
    }

    /// The date whose games this run evaluates. Promotions key off the
    /// previous day's games, so the default is yesterday.
    pub fn run_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| {
            let today = Local::now().date_naive();
            today.checked_sub_days(Days::new(1)).unwrap_or(today)
        })
    }
}

/// Load team configs from a JSON file.
pub fn load_teams_file(path: &Path) -> Result<Vec<TeamConfig>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::TeamsFileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::TeamsFileParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
        key: "PROMO_DATE".into(),
        message: format!("{raw:?}: {e}"),
    })
}

/// The built-in lineup: the two LA clubs and their food deals.
pub fn default_teams() -> Vec<TeamConfig> {
    vec![
        TeamConfig {
            team_id: 119,
            display_name: "Los Angeles Dodgers".into(),
            rules: vec![
                PromotionRule::new("Panda Express plate deal", Trigger::Win),
                PromotionRule::new("McNuggets six-run deal", Trigger::RunsScored { min: 6 }),
            ],
        },
        TeamConfig {
            team_id: 108,
            display_name: "Los Angeles Angels".into(),
            rules: vec![
                PromotionRule::new("McDonald's fries deal", Trigger::Win),
                PromotionRule::new(
                    "Chick-fil-A strikeout sandwich",
                    Trigger::StrikeoutsThrown { min: 7 },
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_teams_are_dodgers_then_angels() {
        let teams = default_teams();
        let ids: Vec<_> = teams.iter().map(|t| t.team_id).collect();
        assert_eq!(ids, vec![119, 108]);
        assert!(teams.iter().all(|t| !t.rules.is_empty()));
    }

    #[test]
    fn teams_file_round_trips() {
        let teams = default_teams();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&teams).unwrap().as_bytes())
            .unwrap();

        let loaded = load_teams_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].display_name, "Los Angeles Dodgers");
        assert_eq!(loaded[0].rules[0].name, "Panda Express plate deal");
    }

    #[test]
    fn malformed_teams_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let result = load_teams_file(file.path());
        assert!(matches!(result, Err(ConfigError::TeamsFileParse { .. })));
    }

    #[test]
    fn missing_teams_file_is_a_read_error() {
        let result = load_teams_file(Path::new("/nonexistent/teams.json"));
        assert!(matches!(result, Err(ConfigError::TeamsFileRead { .. })));
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_date("2025-08-07").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
        );
        assert!(matches!(
            parse_date("08/07/2025"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn explicit_date_wins_over_yesterday() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let config = AppConfig {
            teams: default_teams(),
            date: Some(date),
            statsapi_base_url: DEFAULT_BASE_URL.into(),
            smtp: None,
            recipients: RecipientsSpec::None,
        };
        assert_eq!(config.run_date(), date);
    }
}
