/// Convenience result type used across ifsforge.
pub type IfsResult<T> = Result<T, IfsError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Expected branch termination (a piece that stops expanding, an invalid fid met during
/// iteration, a hit piece cap) is control flow and never surfaces as an error.
#[derive(thiserror::Error, Debug)]
pub enum IfsError {
    /// Invalid user-provided configuration or recipe data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid arguments to a geometric constructor or degenerate geometry input.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors while rasterizing or writing preview images.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IfsError {
    /// Build a [`IfsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IfsError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`IfsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`IfsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for IfsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
