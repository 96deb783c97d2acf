//! Note service - Internal admin notes on tickets.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{require_text, NewNote, Note, NoteWithAuthor};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Note service trait for dependency injection.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// Attach a note authored by `admin_id`; the ticket must exist
    async fn add_note(&self, ticket_id: i32, admin_id: i32, content: String) -> AppResult<Note>;

    /// Notes on a ticket, newest first; empty when there are none
    async fn list_notes(&self, ticket_id: i32) -> AppResult<Vec<NoteWithAuthor>>;
}

/// Concrete implementation of NoteService using Unit of Work.
pub struct NoteManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NoteManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NoteService for NoteManager<U> {
    async fn add_note(&self, ticket_id: i32, admin_id: i32, content: String) -> AppResult<Note> {
        let content = require_text(&content, "Content is required")?;

        self.uow
            .tickets()
            .find_by_id(ticket_id)
            .await?
            .ok_or_not_found("Ticket")?;

        let note = self
            .uow
            .notes()
            .create(NewNote {
                ticket_id,
                admin_id,
                content,
            })
            .await?;

        tracing::info!(note_id = note.id, ticket_id, admin_id, "Note added");
        Ok(note)
    }

    async fn list_notes(&self, ticket_id: i32) -> AppResult<Vec<NoteWithAuthor>> {
        self.uow.notes().list_by_ticket(ticket_id).await
    }
}
