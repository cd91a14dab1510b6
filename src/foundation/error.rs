/// Convenience result type used across probeview.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Fetch- and descriptor-level errors are terminal for a load attempt; there
/// is no retry path. Per-update payload problems are deliberately NOT part of
/// this taxonomy: they degrade to empty chart state at the trace-construction
/// boundary instead of raising.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// Descriptor download or body delivery failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Descriptor does not declare a capability set this engine can serve.
    #[error("unsupported descriptor: {0}")]
    Unsupported(String),

    /// Invalid descriptor payload or violated activation precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from collaborators.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewerError {
    /// Build a [`ViewerError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ViewerError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`ViewerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
