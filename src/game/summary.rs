//! Canonical per-team view of one game.

/// Game state as far as the upstream has decided it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is over and the result stands.
    Final,
    /// Scheduled but not played; no result, no line score.
    Postponed,
    /// Under way; scores are provisional.
    InProgress,
    #[default]
    Unknown,
}

/// The canonical, normalized view of one team's most recent game.
///
/// `played == false` means there was no schedule entry for the date; every
/// other field is then at its default and no rule may be evaluated against
/// the summary (the engine short-circuits).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub played: bool,
    pub is_home: bool,
    pub runs_for: u32,
    pub runs_against: u32,
    /// Upstream winner flag when present; otherwise derived from the run
    /// totals, and only once the game is final.
    pub is_winner: bool,
    pub opponent_name: String,
    /// Team aggregate across every pitcher's line.
    pub strikeouts_by_pitching: u32,
    /// Team aggregate across every batter's line.
    pub stolen_bases: u32,
    /// Inning-by-inning runs for this team; empty when no line score is
    /// available.
    pub runs_by_inning: Vec<u32>,
    pub status: GameStatus,
}

impl GameSummary {
    /// The all-defaults "no game today" summary.
    pub fn not_played() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_played_is_all_defaults() {
        let summary = GameSummary::not_played();
        assert!(!summary.played);
        assert!(!summary.is_winner);
        assert_eq!(summary.runs_for, 0);
        assert_eq!(summary.runs_against, 0);
        assert!(summary.runs_by_inning.is_empty());
        assert_eq!(summary.status, GameStatus::Unknown);
    }
}
