use thiserror::Error;

/// Unified error type for plugin reference resolution
#[derive(Error, Debug)]
pub enum PluginRefError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid git reference: {0}")]
    InvalidRef(String),

    #[error("Pagination error: {0}")]
    Pagination(String),

    #[error("Remote lookup failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in get-plugin-ref
pub type Result<T> = std::result::Result<T, PluginRefError>;

impl PluginRefError {
    /// Create an API error from a response status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        PluginRefError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PluginRefError::Config(msg.into())
    }

    /// Create an invalid reference error
    pub fn invalid_ref(msg: impl Into<String>) -> Self {
        PluginRefError::InvalidRef(msg.into())
    }

    /// Create a pagination error with context
    pub fn pagination(msg: impl Into<String>) -> Self {
        PluginRefError::Pagination(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        PluginRefError::Remote(msg.into())
    }

    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PluginRefError::Api { status, .. } => Some(*status),
            PluginRefError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
