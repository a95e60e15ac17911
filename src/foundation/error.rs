/// Convenience result type used across pageflow.
pub type PageflowResult<T> = Result<T, PageflowError>;

/// Top-level error taxonomy used by construction and loading APIs.
///
/// Runtime requests (show, hide, stack operations) never return these; they degrade to
/// a logged warning instead.
#[derive(thiserror::Error, Debug)]
pub enum PageflowError {
    /// Invalid user-provided page, element or transition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration that is well-formed but cannot be bound to a stage.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PageflowError {
    /// Build a [`PageflowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PageflowError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PageflowError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PageflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Reject negative, NaN and infinite time values.
pub(crate) fn ensure_seconds(what: &str, value: f64) -> PageflowResult<()> {
    if !value.is_finite() {
        return Err(PageflowError::validation(format!(
            "{what} must be finite, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(PageflowError::validation(format!(
            "{what} must be >= 0, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
