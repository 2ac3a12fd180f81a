//! Error types for checks and dice resolution.

/// Alias for `Result<T, MechError>`.
pub type MechResult<T> = Result<T, MechError>;

/// Errors that can occur while resolving rolls.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The entropy provider returned the wrong number of dice.
    #[error("entropy provider returned {got} dice, expected {expected}")]
    EntropyCount {
        /// How many dice the roll requested.
        expected: usize,
        /// How many the provider actually returned.
        got: usize,
    },

    /// The entropy provider returned a value outside 1..=12.
    #[error("entropy value {0} is not a d12 face")]
    EntropyRange(u32),

    /// A roll command line does not start with the `/d12 ` prefix.
    #[error("roll command is missing the /d12 prefix")]
    CommandPrefix,

    /// A roll command's JSON payload does not match the documented shape.
    #[error("malformed roll command: {0}")]
    CommandJson(#[from] serde_json::Error),
}
