use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    ActionBlocked,
    StorageUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("item name cannot be empty")]
    EmptyName,
    #[error("an item with this name already exists")]
    DuplicateName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum BlockedAction {
    #[error("cannot delete while editing")]
    DeleteWhileEditing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("action blocked: {0}")]
    ActionBlocked(#[from] BlockedAction),
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },
}

impl ListError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::ActionBlocked(_) => ErrorCode::ActionBlocked,
            Self::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
        }
    }
}

/// Trims `raw` and rejects names that are empty afterwards.
pub fn normalize_name(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed)
}
