use thiserror::Error;

/// Result type for script loading and navigation
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No script loaded: call load() before navigating")]
    NotLoaded,

    #[error("Invalid window size: {size} (must be an odd integer >= 1)")]
    InvalidWindowSize { size: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
