//! Deleted-ticket archive repository.
//!
//! Append-only: rows are written inside the ticket-delete transaction and never updated.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
    Set,
};

use super::entities::deleted_ticket::{self, ActiveModel, Entity as DeletedTicketEntity};
use crate::domain::{DeletedTicket, TicketWithOwner};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Archive repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Most recent snapshots, newest first
    async fn recent(&self, limit: u64) -> AppResult<Vec<DeletedTicket>>;
}

/// Concrete implementation of ArchiveRepository
pub struct ArchiveStore {
    db: DatabaseConnection,
}

impl ArchiveStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArchiveRepository for ArchiveStore {
    async fn recent(&self, limit: u64) -> AppResult<Vec<DeletedTicket>> {
        let models = DeletedTicketEntity::find()
            .order_by_desc(deleted_ticket::Column::DeletedAt)
            .order_by_desc(deleted_ticket::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        models.into_iter().map(DeletedTicket::try_from).collect()
    }
}

/// Write a snapshot of `ticket`, capturing the owner's name as it is now.
pub(crate) async fn archive<C: ConnectionTrait>(
    db: &C,
    ticket: &TicketWithOwner,
) -> AppResult<DeletedTicket> {
    let active_model = ActiveModel {
        original_id: Set(ticket.ticket.id),
        original_user_id: Set(ticket.ticket.user_id),
        original_user_name: Set(ticket.user_name.clone()),
        title: Set(ticket.ticket.title.clone()),
        description: Set(ticket.ticket.description.clone()),
        priority: Set(ticket.ticket.priority.as_str().to_string()),
        status: Set(ticket.ticket.status.as_str().to_string()),
        deleted_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = active_model.insert(db).await?;
    DeletedTicket::try_from(model)
}
