/// Convenience result type used across spritegen.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy used by editor and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Invalid user-provided configuration or data (out-of-range index, bad size).
    #[error("validation error: {0}")]
    Validation(String),

    /// A user intent that is rejected in the current state (no template, zero frames).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// An external resource (template, image file) could not be loaded.
    #[error("resource load error: {0}")]
    ResourceLoad(String),

    /// Encoded pixel content could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`SpriteError::ResourceLoad`] value.
    pub fn resource_load(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    /// Build a [`SpriteError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SpriteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that reject a user intent without touching state.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
