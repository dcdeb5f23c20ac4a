use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteerError {
    #[error("cannot load {}: {reason}", path.display())]
    RepositoryLoad { path: PathBuf, reason: String },

    #[error("duplicate rule '{key}': {} and {}", first.display(), second.display())]
    DuplicateRule {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("malformed agent descriptor {}: {reason}", path.display())]
    MalformedAgent { path: PathBuf, reason: String },

    #[error("duplicate agent '{name}': {} and {}", first.display(), second.display())]
    DuplicateAgent {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error("invalid task category '{0}'")]
    InvalidCategory(String),

    #[error("invalid language tag '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidLanguage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl SteerError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SteerError::RepositoryLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SteerError::MalformedAgent {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SteerError>;
