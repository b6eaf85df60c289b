//! Edit-session state for the list input: either adding a new item or editing one.

use shared::domain::Item;

pub const ADD_LABEL: &str = "Add movie";
pub const UPDATE_LABEL: &str = "Update Item";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Item),
}

impl EditSession {
    pub fn target(&self) -> Option<&Item> {
        match self {
            Self::Idle => None,
            Self::Editing(item) => Some(item),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Label for the submit action in the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Idle => ADD_LABEL,
            Self::Editing(_) => UPDATE_LABEL,
        }
    }
}
