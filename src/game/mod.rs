//! Canonical game results.
//!
//! The normalizer is the single place upstream schema drift is absorbed:
//! every raw schedule + box score pair becomes one `GameSummary`, and
//! everything downstream (rules, report) reads only that.

pub mod normalize;
pub mod summary;

pub use normalize::{normalize, scheduled_game_pk};
pub use summary::{GameStatus, GameSummary};
