use crate::config::ConfigError;

/// Failures that stop the gallery before or outside the fetch pipeline
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("a global logger is already installed")]
    LoggerInstalled,
}
