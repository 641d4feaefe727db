use thiserror::Error;

/// Errors raised while validating load settings. Always raised before the
/// input or the database is touched.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Batch size was zero, negative or not a number.
    #[error("Invalid batch size '{0}': must be a positive integer")]
    InvalidBatchSize(String),

    #[error("Invalid table mode: {0}")]
    InvalidMode(String),

    /// A required setting was never provided to the builder.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Settings validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
