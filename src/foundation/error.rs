/// Convenience result type used across the crate.
pub type WarpResult<T> = Result<T, WarpError>;

/// Errors surfaced by streak generation, scheduling and rendering.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// A startup requirement was not met (for example a missing root surface).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Invalid configuration or API usage.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure reported by a [`crate::Renderer`] implementation.
    #[error("render error: {0}")]
    Render(String),

    /// Config or stats (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WarpError {
    /// Build a [`WarpError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`WarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WarpError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
