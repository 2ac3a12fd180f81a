//! Error types for the core stat engine.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while computing stats.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The named stat does not exist in the catalog.
    ///
    /// Valid data never triggers this; it indicates a caller bug, not a
    /// malformed character.
    #[error("unknown stat: {0}")]
    UnknownStat(String),

    /// A share string could not be decoded.
    #[error("malformed share string: {0}")]
    ShareString(String),
}
