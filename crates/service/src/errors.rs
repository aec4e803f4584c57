use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ServiceError {
    pub fn io(action: &str, path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io(format!("failed to {action} {}: {err}", path.display()))
    }

    pub fn parse(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Parse(format!("failed to parse {}: {err}", path.display()))
    }
}
