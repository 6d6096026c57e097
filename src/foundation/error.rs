/// Convenience result type used across stroketrace.
pub type TraceResult<T> = Result<T, TraceError>;

/// Failures while turning a path description into a polyline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The source produced fewer than two points.
    #[error("path needs at least 2 points, got {got}")]
    InsufficientPoints {
        /// Number of points the source yielded.
        got: usize,
    },

    /// A curve source asked for zero samples per segment.
    #[error("curve sampling must use at least 1 sample per segment")]
    InvalidSampling,
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    /// Polyline construction failed.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Structurally invalid lesson or chain data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A setting could not be interpreted (bad SVG path, bad shape, ...).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TraceError {
    /// Build a [`TraceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TraceError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TraceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
