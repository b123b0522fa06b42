// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid pathway: {0}")]
    InvalidInput(String),

    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("Unsupported perturbation type '{0}': expected knockout or overexpression")]
    UnsupportedPerturbationType(String),

    #[error("Node '{0}' not found in pathway")]
    NodeNotFound(String),

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Config error: {source} (path: {path})")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl SimError {
    /// HTTP-equivalent status class for a calling service boundary.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidInput(_)
            | Self::MissingParameter(_)
            | Self::UnsupportedPerturbationType(_)
            | Self::InvalidSetting { .. } => 400,
            Self::NodeNotFound(_) => 404,
            Self::Config { .. } | Self::Json(_) | Self::Io { .. } => 500,
        }
    }

    /// True for errors caused by the caller's request rather than the environment.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self.status(), 400 | 404)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

// Allow `?` on std::io::Error by converting to SimError::Io with unknown path.
impl From<std::io::Error> for SimError {
    fn from(source: std::io::Error) -> Self {
        SimError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
