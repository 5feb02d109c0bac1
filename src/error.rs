use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vault-session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Config(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Error reading vault keys from {}: {source}", .path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Flags(#[from] clap::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn client<S: Into<String>>(msg: S) -> Self {
        Self::Client(msg.into())
    }

    pub fn credentials<P, E>(path: P, source: E) -> Self
    where
        P: Into<PathBuf>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Credentials {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type alias for vault-session operations
pub type Result<T> = std::result::Result<T, SessionError>;

impl From<url::ParseError> for SessionError {
    fn from(error: url::ParseError) -> Self {
        Self::Client(error.to_string())
    }
}
