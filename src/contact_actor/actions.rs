//! Custom actions for contact messages.

use crate::framework::EntityAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    /// `PUT /contact/{id}/read`
    MarkAsRead,
}

impl EntityAction for ContactAction {
    fn path(&self) -> &'static str {
        match self {
            ContactAction::MarkAsRead => "read",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            ContactAction::MarkAsRead => "mark as read",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            ContactAction::MarkAsRead => "marked as read",
        }
    }
}
