//! Error types for the chart engine

use thiserror::Error;

/// Errors that can occur when validating, rendering, or exporting charts
#[derive(Error, Debug)]
pub enum ChartError {
    /// A required input field is empty
    #[error("please fill out the {0} field")]
    MissingField(&'static str),

    /// A value token could not be parsed as a finite number
    #[error("value {token:?} is not a number; values must be numbers, comma-separated (e.g. 10,20,30)")]
    MalformedNumber { token: String },

    /// The label and value lists have different lengths
    #[error("labels and values must have the same number of items (labels: {labels}, values: {values})")]
    CountMismatch { labels: usize, values: usize },

    /// All values sum to zero, so percentages are undefined
    #[error("values sum to zero, so percentages cannot be computed")]
    ZeroTotal,

    /// Rendering error
    #[error("rendering error: {0}")]
    Render(String),

    /// Image export error
    #[error("export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// Whether the error is a recoverable input-validation error, as opposed
    /// to a rendering or filesystem failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChartError::MissingField(_)
                | ChartError::MalformedNumber { .. }
                | ChartError::CountMismatch { .. }
                | ChartError::ZeroTotal
        )
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
