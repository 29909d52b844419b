//! Error types for Promo Watch.

/// Top-level error type for a promo run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read teams file {path}: {reason}")]
    TeamsFileRead { path: String, reason: String },

    #[error("Failed to parse teams file {path}: {reason}")]
    TeamsFileParse { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Game-data provider errors.
///
/// Absence of a game or a box score is NOT an error — providers signal it
/// with an empty schedule or `None`. These variants cover transport and
/// payload failures only.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Schedule request for team {team_id} failed: {reason}")]
    ScheduleFetch { team_id: u32, reason: String },

    #[error("Boxscore request for game {game_pk} failed: {reason}")]
    BoxscoreFetch { game_pk: i64, reason: String },

    #[error("Unexpected payload from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Rule evaluation errors.
///
/// Always isolated to the rule that produced them: the engine records the
/// rule as not triggered and keeps evaluating its siblings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Combinator has no operands")]
    EmptyCombinator,
}

/// Notification boundary errors. Fatal to the run: a warranted notification
/// that cannot be delivered must not look like success.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Recipient fetch failed: {0}")]
    RecipientFetch(String),

    #[error("Notification warranted but the recipient list is empty")]
    NoRecipients,

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

/// Result type alias for promo runs.
pub type Result<T> = std::result::Result<T, Error>;
