/// Convenience result type used across the crate.
pub type GearersResult<T> = Result<T, GearersError>;

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum GearersError {
    /// Malformed interpolation breakpoints: non-monotonic, mismatched lengths or non-finite.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Invalid user-provided descriptor or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid easing configuration (spring parameters, settle measurement).
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while producing a frame (bounds, lookup, rasterization).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GearersError {
    /// Build a [`GearersError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`GearersError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GearersError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GearersError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GearersError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
