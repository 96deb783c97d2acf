//! Internal notes attached to tickets by administrators.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Note domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Note {
    pub id: i32,
    pub ticket_id: i32,
    /// Author; `None` once the author account is deleted
    pub admin_id: Option<i32>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Note as listed on a ticket, with the author's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteWithAuthor {
    pub id: i32,
    #[schema(example = "Called the user, waiting for a reply")]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[schema(example = "System Admin")]
    pub admin_name: Option<String>,
}

/// Data for adding a note
#[derive(Debug, Clone)]
pub struct NewNote {
    pub ticket_id: i32,
    pub admin_id: i32,
    pub content: String,
}
