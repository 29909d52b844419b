//! Declarative promotion triggers.
//!
//! A trigger is data, not a closure: it can be listed, serialized into the
//! teams file, and tested without executing arbitrary code. Evaluation is a
//! pure function of the game summary.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::game::GameSummary;

/// A named promotion and the condition that activates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionRule {
    /// Promotion name as shown in the report ("Panda Express plate deal").
    pub name: String,
    /// Condition on the game result.
    pub trigger: Trigger,
}

impl PromotionRule {
    pub fn new(name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            name: name.into(),
            trigger,
        }
    }
}

/// Condition on a `GameSummary`.
///
/// Thresholds compare against the team aggregates of the summary;
/// combinators allow compound promotions ("home win with 10+ strikeouts").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Team won.
    Win,
    /// Team won at home.
    HomeWin,
    /// Team scored at least `min` runs.
    RunsScored { min: u32 },
    /// Team won by at least `min` runs.
    WinningMargin { min: u32 },
    /// Team pitching recorded at least `min` strikeouts.
    StrikeoutsThrown { min: u32 },
    /// Team recorded at least `min` stolen bases.
    StolenBases { min: u32 },
    /// Team scored at least `min` runs in a single inning.
    BigInning { min: u32 },
    /// Opponent was held to at most `max` runs.
    OpponentHeldTo { max: u32 },
    /// Every sub-trigger holds.
    All { of: Vec<Trigger> },
    /// At least one sub-trigger holds.
    Any { of: Vec<Trigger> },
}

impl Trigger {
    /// Evaluate against a played game.
    ///
    /// Total over every well-formed summary; the only failure mode is a
    /// malformed trigger itself (an empty combinator), which the engine
    /// isolates per rule.
    pub fn evaluate(&self, summary: &GameSummary) -> Result<bool, RuleError> {
        match self {
            Self::Win => Ok(summary.is_winner),
            Self::HomeWin => Ok(summary.is_winner && summary.is_home),
            Self::RunsScored { min } => Ok(summary.runs_for >= *min),
            Self::WinningMargin { min } => {
                Ok(summary.is_winner
                    && summary.runs_for.saturating_sub(summary.runs_against) >= *min)
            }
            Self::StrikeoutsThrown { min } => Ok(summary.strikeouts_by_pitching >= *min),
            Self::StolenBases { min } => Ok(summary.stolen_bases >= *min),
            Self::BigInning { min } => Ok(summary.runs_by_inning.iter().any(|runs| runs >= min)),
            Self::OpponentHeldTo { max } => Ok(summary.runs_against <= *max),
            Self::All { of } => {
                if of.is_empty() {
                    return Err(RuleError::EmptyCombinator);
                }
                for trigger in of {
                    if !trigger.evaluate(summary)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any { of } => {
                if of.is_empty() {
                    return Err(RuleError::EmptyCombinator);
                }
                for trigger in of {
                    if trigger.evaluate(summary)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    fn home_win() -> GameSummary {
        GameSummary {
            played: true,
            is_home: true,
            runs_for: 7,
            runs_against: 2,
            is_winner: true,
            opponent_name: "Los Angeles Angels".into(),
            strikeouts_by_pitching: 9,
            stolen_bases: 1,
            runs_by_inning: vec![3, 0, 4],
            status: GameStatus::Final,
        }
    }

    fn road_loss() -> GameSummary {
        GameSummary {
            played: true,
            is_home: false,
            runs_for: 2,
            runs_against: 7,
            is_winner: false,
            opponent_name: "Los Angeles Dodgers".into(),
            strikeouts_by_pitching: 4,
            stolen_bases: 0,
            runs_by_inning: vec![0, 2, 0],
            status: GameStatus::Final,
        }
    }

    #[test]
    fn win_trigger() {
        assert_eq!(Trigger::Win.evaluate(&home_win()), Ok(true));
        assert_eq!(Trigger::Win.evaluate(&road_loss()), Ok(false));
    }

    #[test]
    fn home_win_requires_both() {
        assert_eq!(Trigger::HomeWin.evaluate(&home_win()), Ok(true));
        let road_win = GameSummary {
            is_home: false,
            ..home_win()
        };
        assert_eq!(Trigger::HomeWin.evaluate(&road_win), Ok(false));
    }

    #[test]
    fn runs_scored_threshold() {
        assert_eq!(Trigger::RunsScored { min: 7 }.evaluate(&home_win()), Ok(true));
        assert_eq!(Trigger::RunsScored { min: 8 }.evaluate(&home_win()), Ok(false));
    }

    #[test]
    fn winning_margin_requires_win() {
        assert_eq!(
            Trigger::WinningMargin { min: 5 }.evaluate(&home_win()),
            Ok(true)
        );
        assert_eq!(
            Trigger::WinningMargin { min: 6 }.evaluate(&home_win()),
            Ok(false)
        );
        // A loss never satisfies a margin, whatever the totals say.
        assert_eq!(
            Trigger::WinningMargin { min: 0 }.evaluate(&road_loss()),
            Ok(false)
        );
    }

    #[test]
    fn strikeouts_and_stolen_bases() {
        assert_eq!(
            Trigger::StrikeoutsThrown { min: 7 }.evaluate(&home_win()),
            Ok(true)
        );
        assert_eq!(
            Trigger::StrikeoutsThrown { min: 10 }.evaluate(&home_win()),
            Ok(false)
        );
        assert_eq!(Trigger::StolenBases { min: 1 }.evaluate(&home_win()), Ok(true));
        assert_eq!(Trigger::StolenBases { min: 1 }.evaluate(&road_loss()), Ok(false));
    }

    #[test]
    fn big_inning_checks_each_inning() {
        assert_eq!(Trigger::BigInning { min: 4 }.evaluate(&home_win()), Ok(true));
        assert_eq!(Trigger::BigInning { min: 5 }.evaluate(&home_win()), Ok(false));
        // No line score: nothing qualifies.
        let no_linescore = GameSummary {
            runs_by_inning: vec![],
            ..home_win()
        };
        assert_eq!(
            Trigger::BigInning { min: 1 }.evaluate(&no_linescore),
            Ok(false)
        );
    }

    #[test]
    fn opponent_held_to() {
        assert_eq!(
            Trigger::OpponentHeldTo { max: 2 }.evaluate(&home_win()),
            Ok(true)
        );
        assert_eq!(
            Trigger::OpponentHeldTo { max: 1 }.evaluate(&home_win()),
            Ok(false)
        );
    }

    #[test]
    fn combinators() {
        let compound = Trigger::All {
            of: vec![Trigger::HomeWin, Trigger::StrikeoutsThrown { min: 7 }],
        };
        assert_eq!(compound.evaluate(&home_win()), Ok(true));
        assert_eq!(compound.evaluate(&road_loss()), Ok(false));

        let either = Trigger::Any {
            of: vec![Trigger::Win, Trigger::RunsScored { min: 2 }],
        };
        assert_eq!(either.evaluate(&road_loss()), Ok(true));
    }

    #[test]
    fn empty_combinators_are_errors() {
        assert_eq!(
            Trigger::All { of: vec![] }.evaluate(&home_win()),
            Err(RuleError::EmptyCombinator)
        );
        assert_eq!(
            Trigger::Any { of: vec![] }.evaluate(&home_win()),
            Err(RuleError::EmptyCombinator)
        );
        // Errors propagate out of nested combinators too.
        let nested = Trigger::All {
            of: vec![Trigger::Win, Trigger::Any { of: vec![] }],
        };
        assert_eq!(nested.evaluate(&home_win()), Err(RuleError::EmptyCombinator));
    }

    #[test]
    fn triggers_round_trip_through_json() {
        let rule = PromotionRule::new(
            "Strikeout sandwich",
            Trigger::All {
                of: vec![Trigger::HomeWin, Trigger::StrikeoutsThrown { min: 7 }],
            },
        );
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["trigger"]["kind"], "all");
        assert_eq!(json["trigger"]["of"][1]["kind"], "strikeouts_thrown");
        assert_eq!(json["trigger"]["of"][1]["min"], 7);

        let back: PromotionRule = serde_json::from_value(json).unwrap();
        assert_eq!(back.name, "Strikeout sandwich");
        assert_eq!(back.trigger.evaluate(&home_win()), Ok(true));
    }
}
