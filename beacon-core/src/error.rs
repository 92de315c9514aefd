//! Error types shared across the core controllers.

/// Errors raised while interpreting persisted or configured values.
///
/// User input never produces a `CoreError`; validation failures are modelled
/// as values in [`crate::form`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid theme value: {0:?}")]
    InvalidTheme(String),
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
