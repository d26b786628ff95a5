//! Error types for airlink

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Airlink error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Received buffer does not match the fixed record size
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Declared record size
        expected: usize,
        /// Length of the received buffer
        actual: usize,
    },

    /// Peer address could not be parsed
    #[error("Invalid peer address: {0}")]
    InvalidAddress(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown mixer strategy name
    #[error("Unknown mixer: {0}")]
    UnknownMixer(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
