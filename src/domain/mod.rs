//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod note;
pub mod password;
pub mod ticket;
pub mod user;

pub use note::{NewNote, Note, NoteWithAuthor};
pub use password::Password;
pub use ticket::{DeletedTicket, NewTicket, Ticket, TicketPriority, TicketStatus, TicketWithOwner};
pub use user::{NewUser, ProfileChanges, User, UserProfile, UserRole, UserSummary};

/// Trim a required text field, failing when nothing is left.
pub fn require_text(value: &str, message: &str) -> crate::errors::AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::errors::AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, treating blank input as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
