//! Note repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::note::{self, ActiveModel, Entity as NoteEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{NewNote, Note, NoteWithAuthor};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Note repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note
    async fn create(&self, note: NewNote) -> AppResult<Note>;

    /// Notes on a ticket with author names, newest first.
    /// Notes whose author was deleted are kept with no name.
    async fn list_by_ticket(&self, ticket_id: i32) -> AppResult<Vec<NoteWithAuthor>>;
}

/// Concrete implementation of NoteRepository
pub struct NoteStore {
    db: DatabaseConnection,
}

impl NoteStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for NoteStore {
    async fn create(&self, new_note: NewNote) -> AppResult<Note> {
        let active_model = ActiveModel {
            ticket_id: Set(new_note.ticket_id),
            admin_id: Set(Some(new_note.admin_id)),
            content: Set(new_note.content),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_foreign_key_violation(e, "Ticket"))?;
        Ok(Note::from(model))
    }

    async fn list_by_ticket(&self, ticket_id: i32) -> AppResult<Vec<NoteWithAuthor>> {
        let rows = NoteEntity::find()
            .find_also_related(UserEntity)
            .filter(note::Column::TicketId.eq(ticket_id))
            .order_by_desc(note::Column::CreatedAt)
            .order_by_desc(note::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(note, author)| NoteWithAuthor {
                id: note.id,
                content: note.content,
                created_at: note.created_at,
                admin_name: author.map(|a| a.name),
            })
            .collect())
    }
}
