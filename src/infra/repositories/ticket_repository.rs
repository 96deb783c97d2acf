//! Ticket repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::ticket::{self, ActiveModel, Entity as TicketEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{NewTicket, Ticket, TicketStatus, TicketWithOwner, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ticket repository trait for dependency injection.
///
/// Listings are newest first; the ID breaks ties between equal timestamps.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find ticket by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Ticket>>;

    /// Insert a ticket with the default status
    async fn create(&self, ticket: NewTicket) -> AppResult<Ticket>;

    /// All tickets opened by a user
    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Ticket>>;

    /// Every ticket with its owner's name and email
    async fn list_with_owner(&self) -> AppResult<Vec<TicketWithOwner>>;

    /// Set the status, returning the number of matched rows
    async fn update_status(&self, id: i32, status: TicketStatus) -> AppResult<u64>;
}

/// Concrete implementation of TicketRepository
pub struct TicketStore {
    db: DatabaseConnection,
}

impl TicketStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketRepository for TicketStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Ticket>> {
        let result = TicketEntity::find_by_id(id).one(&self.db).await?;
        result.map(Ticket::try_from).transpose()
    }

    async fn create(&self, new_ticket: NewTicket) -> AppResult<Ticket> {
        let active_model = ActiveModel {
            user_id: Set(new_ticket.user_id),
            title: Set(new_ticket.title),
            description: Set(new_ticket.description),
            priority: Set(new_ticket.priority.as_str().to_string()),
            status: Set(TicketStatus::default().as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_foreign_key_violation(e, "User"))?;
        Ticket::try_from(model)
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Ticket>> {
        let models = TicketEntity::find()
            .filter(ticket::Column::UserId.eq(user_id))
            .order_by_desc(ticket::Column::CreatedAt)
            .order_by_desc(ticket::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Ticket::try_from).collect()
    }

    async fn list_with_owner(&self) -> AppResult<Vec<TicketWithOwner>> {
        let rows = TicketEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(ticket::Column::CreatedAt)
            .order_by_desc(ticket::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(ticket, owner)| with_owner(ticket, owner))
            .collect()
    }

    async fn update_status(&self, id: i32, status: TicketStatus) -> AppResult<u64> {
        let result = TicketEntity::update_many()
            .col_expr(ticket::Column::Status, Expr::value(status.as_str()))
            .filter(ticket::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn with_owner(ticket: ticket::Model, owner: Option<user::Model>) -> AppResult<TicketWithOwner> {
    let owner = owner
        .map(User::try_from)
        .transpose()?
        .ok_or_else(|| AppError::internal(format!("ticket {} has no owner", ticket.id)))?;

    Ok(TicketWithOwner {
        ticket: Ticket::try_from(ticket)?,
        user_name: owner.name,
        user_email: owner.email,
    })
}

/// Ticket plus its owner's current name, read before deletion.
pub(crate) async fn find_with_owner<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> AppResult<Option<TicketWithOwner>> {
    let row = TicketEntity::find_by_id(id)
        .find_also_related(UserEntity)
        .one(db)
        .await?;

    row.map(|(ticket, owner)| with_owner(ticket, owner)).transpose()
}

/// Delete a ticket row; notes go with it through the cascade.
pub(crate) async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<u64> {
    let result = TicketEntity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
