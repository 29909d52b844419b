//! Raw upstream payload schema.
//!
//! Every field is optional. The upstream API drops whole subtrees when data
//! has not been ingested yet (no box score minutes after a game, no
//! `isWinner` flag mid-game, no line score for postponed games), so the
//! schema models absence explicitly instead of failing the decode. The
//! normalizer is the only consumer and maps absence to defaults.

use std::collections::HashMap;

use serde::Deserialize;

// ── Schedule ────────────────────────────────────────────────────────

/// Schedule lookup response: zero or more dates, each with zero or more
/// games. An empty `dates` list is the "no game" sentinel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchedule {
    #[serde(default)]
    pub dates: Vec<RawScheduleDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleDate {
    pub date: Option<String>,
    #[serde(default)]
    pub games: Vec<RawGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    pub game_pk: Option<i64>,
    pub status: Option<RawGameStatus>,
    pub teams: Option<RawGameTeams>,
    /// Present only when the schedule was hydrated with the line score.
    pub linescore: Option<RawLineScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameStatus {
    /// Coarse state: "Final", "Live", "Preview".
    pub abstract_game_state: Option<String>,
    /// Finer state: "Final", "Postponed", "In Progress", "Scheduled", ...
    pub detailed_state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameTeams {
    pub home: Option<RawGameSide>,
    pub away: Option<RawGameSide>,
}

/// One side of a scheduled game.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameSide {
    pub team: Option<RawTeamRef>,
    pub score: Option<u32>,
    /// Set by the upstream only once it has decided the game; absent
    /// mid-game and on postponed games.
    pub is_winner: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamRef {
    pub id: Option<u32>,
    pub name: Option<String>,
}

// ── Line score ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineScore {
    #[serde(default)]
    pub innings: Vec<RawInning>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInning {
    pub num: Option<u32>,
    pub home: Option<RawInningSide>,
    pub away: Option<RawInningSide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInningSide {
    pub runs: Option<u32>,
}

// ── Box score ───────────────────────────────────────────────────────

/// Box score response: per-player stat lines keyed by roster id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoxscore {
    pub teams: Option<RawBoxscoreTeams>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoxscoreTeams {
    pub home: Option<RawBoxscoreSide>,
    pub away: Option<RawBoxscoreSide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoxscoreSide {
    pub team: Option<RawTeamRef>,
    /// Keyed by upstream player id ("ID660271" style); key is irrelevant
    /// here, only the stat lines are.
    #[serde(default)]
    pub players: HashMap<String, RawPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    pub stats: Option<RawPlayerStats>,
}

/// A player carries only the categories they participated in: pitchers
/// usually lack `batting`, position players lack `pitching`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerStats {
    pub batting: Option<RawBattingStats>,
    pub pitching: Option<RawPitchingStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBattingStats {
    pub stolen_bases: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPitchingStats {
    pub strike_outs: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_decodes_with_everything_missing() {
        let raw: RawSchedule = serde_json::from_str("{}").unwrap();
        assert!(raw.dates.is_empty());
    }

    #[test]
    fn schedule_decodes_partial_game() {
        let raw: RawSchedule = serde_json::from_value(serde_json::json!({
            "dates": [{"date": "2025-08-07", "games": [{"gamePk": 716463}]}]
        }))
        .unwrap();
        let game = &raw.dates[0].games[0];
        assert_eq!(game.game_pk, Some(716463));
        assert!(game.status.is_none());
        assert!(game.teams.is_none());
        assert!(game.linescore.is_none());
    }

    #[test]
    fn boxscore_decodes_player_without_pitching_line() {
        let raw: RawBoxscore = serde_json::from_value(serde_json::json!({
            "teams": {"home": {"players": {
                "ID660271": {"stats": {"batting": {"stolenBases": 2}}}
            }}}
        }))
        .unwrap();
        let side = raw.teams.unwrap().home.unwrap();
        let player = side.players.get("ID660271").unwrap();
        let stats = player.stats.as_ref().unwrap();
        assert_eq!(stats.batting.as_ref().unwrap().stolen_bases, Some(2));
        assert!(stats.pitching.is_none());
    }
}
