//! User-facing alert texts for controller outcomes.

use shared::error::{BlockedAction, ListError, ValidationError};

pub const CONFIRM_DELETE_TITLE: &str = "Confirm Delete";
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this item?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

impl From<&ListError> for Alert {
    fn from(err: &ListError) -> Self {
        match err {
            ListError::Validation(ValidationError::EmptyName) => Self {
                title: "Error",
                message: "Item name cannot be empty!".to_string(),
            },
            ListError::Validation(ValidationError::DuplicateName) => Self {
                title: "Error",
                message: "This item already exists!".to_string(),
            },
            ListError::ActionBlocked(BlockedAction::DeleteWhileEditing) => Self {
                title: "Action Blocked",
                message: "You cannot delete items while updating one.".to_string(),
            },
            ListError::StorageUnavailable { message } => Self {
                title: "Error",
                message: format!("Storage unavailable: {message}"),
            },
        }
    }
}
