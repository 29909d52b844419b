//! Result normalizer — raw schedule + box score to `GameSummary`.
//!
//! Pure transform over already-fetched data. Structurally-absent input
//! never fails: absence maps to defaults and `played` is the single source
//! of truth for "was there a game". The winner flag fallback compares run
//! totals only on final games; mid-game scores are not determinative.

use tracing::{debug, warn};

use crate::game::summary::{GameStatus, GameSummary};
use crate::provider::raw::{
    RawBoxscore, RawBoxscoreSide, RawGame, RawGameSide, RawGameStatus, RawSchedule,
};

/// Normalize one team's raw schedule + box score pair.
pub fn normalize(
    schedule: &RawSchedule,
    boxscore: Option<&RawBoxscore>,
    team_id: u32,
) -> GameSummary {
    let Some((game, is_home)) = find_game(schedule, team_id) else {
        debug!(team_id, "No schedule entry — treating as not played");
        return GameSummary::not_played();
    };

    let status = map_status(game.status.as_ref());

    let (side, opponent) = match (is_home, game.teams.as_ref()) {
        (true, Some(teams)) => (teams.home.as_ref(), teams.away.as_ref()),
        (false, Some(teams)) => (teams.away.as_ref(), teams.home.as_ref()),
        // find_game matched through `teams`, so this arm cannot be hit.
        (_, None) => (None, None),
    };

    let runs_for = side.and_then(|s| s.score).unwrap_or(0);
    let runs_against = opponent.and_then(|s| s.score).unwrap_or(0);

    let is_winner = match side.and_then(|s| s.is_winner) {
        Some(flag) => flag,
        // No upstream decision: only a final score is determinative.
        None => status == GameStatus::Final && runs_for > runs_against,
    };

    let opponent_name = opponent
        .and_then(|s| s.team.as_ref())
        .and_then(|t| t.name.clone())
        .unwrap_or_default();

    let runs_by_inning = runs_by_inning(game, is_home);

    let (strikeouts_by_pitching, stolen_bases) = match boxscore {
        Some(raw) => team_aggregates(raw, team_id),
        None => {
            debug!(team_id, "No boxscore — aggregates default to zero");
            (0, 0)
        }
    };

    GameSummary {
        played: true,
        is_home,
        runs_for,
        runs_against,
        is_winner,
        opponent_name,
        strikeouts_by_pitching,
        stolen_bases,
        runs_by_inning,
        status,
    }
}

/// The game id the run should fetch a box score for, if the schedule has a
/// game for this team at all.
pub fn scheduled_game_pk(schedule: &RawSchedule, team_id: u32) -> Option<i64> {
    find_game(schedule, team_id).and_then(|(game, _)| game.game_pk)
}

/// Locate the team's game and side in the schedule. First match wins — for
/// doubleheaders this is the earlier game, matching the upstream ordering.
fn find_game(schedule: &RawSchedule, team_id: u32) -> Option<(&RawGame, bool)> {
    for date in &schedule.dates {
        for game in &date.games {
            let Some(teams) = game.teams.as_ref() else {
                continue;
            };
            if side_matches(teams.home.as_ref(), team_id) {
                return Some((game, true));
            }
            if side_matches(teams.away.as_ref(), team_id) {
                return Some((game, false));
            }
            warn!(
                team_id,
                game_pk = ?game.game_pk,
                "Schedule entry matches neither side, skipping"
            );
        }
    }
    None
}

fn side_matches(side: Option<&RawGameSide>, team_id: u32) -> bool {
    side.and_then(|s| s.team.as_ref())
        .and_then(|t| t.id)
        .is_some_and(|id| id == team_id)
}

/// Map the upstream status record. Postponed games carry a "Final"-looking
/// abstract state upstream, so the detailed state is checked first.
fn map_status(status: Option<&RawGameStatus>) -> GameStatus {
    let Some(status) = status else {
        return GameStatus::Unknown;
    };
    let detailed = status.detailed_state.as_deref().unwrap_or("");
    if detailed.starts_with("Postponed") {
        return GameStatus::Postponed;
    }
    match status.abstract_game_state.as_deref() {
        Some("Final") => GameStatus::Final,
        Some("Live") => GameStatus::InProgress,
        _ if detailed == "In Progress" => GameStatus::InProgress,
        _ => GameStatus::Unknown,
    }
}

/// Per-inning runs for the team's side. Missing or unhydrated line score
/// yields the empty sequence; an inning without a runs entry for the side
/// (e.g. an unplayed bottom of the ninth) contributes zero.
fn runs_by_inning(game: &RawGame, is_home: bool) -> Vec<u32> {
    let Some(linescore) = game.linescore.as_ref() else {
        return Vec::new();
    };
    linescore
        .innings
        .iter()
        .map(|inning| {
            let side = if is_home {
                inning.home.as_ref()
            } else {
                inning.away.as_ref()
            };
            side.and_then(|s| s.runs).unwrap_or(0)
        })
        .collect()
}

/// Team totals summed over every player line on the roster. A player
/// missing a stat category contributes zero.
fn team_aggregates(boxscore: &RawBoxscore, team_id: u32) -> (u32, u32) {
    let Some(side) = box_side(boxscore, team_id) else {
        warn!(team_id, "Boxscore has no side for team, aggregates zeroed");
        return (0, 0);
    };

    let mut strikeouts = 0;
    let mut stolen_bases = 0;
    for player in side.players.values() {
        let Some(stats) = player.stats.as_ref() else {
            continue;
        };
        if let Some(pitching) = stats.pitching.as_ref() {
            strikeouts += pitching.strike_outs.unwrap_or(0);
        }
        if let Some(batting) = stats.batting.as_ref() {
            stolen_bases += batting.stolen_bases.unwrap_or(0);
        }
    }
    (strikeouts, stolen_bases)
}

fn box_side(boxscore: &RawBoxscore, team_id: u32) -> Option<&RawBoxscoreSide> {
    let teams = boxscore.teams.as_ref()?;
    let id_of = |side: Option<&RawBoxscoreSide>| {
        side.and_then(|s| s.team.as_ref()).and_then(|t| t.id)
    };
    if id_of(teams.home.as_ref()) == Some(team_id) {
        return teams.home.as_ref();
    }
    if id_of(teams.away.as_ref()) == Some(team_id) {
        return teams.away.as_ref();
    }
    None
}
