//! Error types for the dice-pool engine.

/// A malformed roll expression.
///
/// Always a user input error: recoverable, reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The expression has more segments than `attribute + skill + modifier`.
    #[error("invalid roll format: {0}")]
    InvalidFormat(String),

    /// The third segment of a three-term expression is not an integer.
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),

    /// The expression, or one of its name segments, is empty.
    #[error("empty term in roll expression: '{0}'")]
    EmptyTerm(String),
}

/// Errors that can occur while resolving and rolling a dice pool.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// The roll expression could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A named term did not resolve to a stat.
    #[error("no such stat: {0}")]
    StatNotFound(String),

    /// The final pool exceeds the configured maximum.
    #[error("pool of {pool} dice exceeds the maximum of {max}")]
    PoolTooLarge {
        /// The requested pool size.
        pool: i32,
        /// The configured limit.
        max: i32,
    },

    /// An exploding threshold outside 8, 9, and 10 was requested.
    #[error("invalid exploding threshold: {0} (expected 8, 9, or 10)")]
    InvalidThreshold(u32),

    /// A roll switch is not a known modifier.
    #[error("unknown roll switch: {0}")]
    UnknownSwitch(String),

    /// A session command was not recognized.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command was used incorrectly.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// The record policy refused a post.
    #[error("{0} may not post to this record")]
    RecordDenied(String),

    /// A stat table could not be loaded.
    #[error("invalid stats: {0}")]
    InvalidStats(#[from] serde_json::Error),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
