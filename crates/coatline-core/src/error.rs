/// Convenience result type used across Coatline.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the Coatline crates.
///
/// Degenerate geometry and navigation on empty lists are not errors; those
/// clamp to safe defaults instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A breakpoint table that cannot be evaluated.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// An index outside the list it addresses.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An operation that needs at least one element.
    #[error("{0} is empty")]
    EmptyCollection(&'static str),

    /// Missing or malformed configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Persistent storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// User input that failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl Error {
    pub fn invalid_curve(msg: impl Into<String>) -> Self {
        Self::InvalidCurve(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
