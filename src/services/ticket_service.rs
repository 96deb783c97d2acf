//! Ticket service - Ticket lifecycle, including the delete-to-archive transition.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::DELETED_TICKET_HISTORY_LIMIT;
use crate::domain::{
    require_text, DeletedTicket, NewTicket, Ticket, TicketPriority, TicketStatus, TicketWithOwner,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Ticket service trait for dependency injection.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Open a ticket for `user_id` with status `In attesa`
    async fn create_ticket(
        &self,
        user_id: i32,
        title: String,
        description: String,
        priority: TicketPriority,
    ) -> AppResult<Ticket>;

    /// Tickets of one user, newest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Ticket>>;

    /// Every ticket with owner details, newest first
    async fn list_all(&self) -> AppResult<Vec<TicketWithOwner>>;

    async fn update_status(&self, id: i32, status: TicketStatus) -> AppResult<()>;

    /// Archive a snapshot, then delete the ticket and its notes, atomically
    async fn delete_ticket(&self, id: i32) -> AppResult<DeletedTicket>;

    /// Latest archived tickets, newest first
    async fn recent_deletions(&self) -> AppResult<Vec<DeletedTicket>>;
}

/// Concrete implementation of TicketService using Unit of Work.
pub struct TicketManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TicketManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> TicketService for TicketManager<U> {
    async fn create_ticket(
        &self,
        user_id: i32,
        title: String,
        description: String,
        priority: TicketPriority,
    ) -> AppResult<Ticket> {
        let title = require_text(&title, "Title is required")?;
        let description = require_text(&description, "Description is required")?;

        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        let ticket = self
            .uow
            .tickets()
            .create(NewTicket {
                user_id,
                title,
                description,
                priority,
            })
            .await?;

        tracing::info!(ticket_id = ticket.id, user_id, "Ticket created");
        Ok(ticket)
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Ticket>> {
        self.uow.tickets().list_by_user(user_id).await
    }

    async fn list_all(&self) -> AppResult<Vec<TicketWithOwner>> {
        self.uow.tickets().list_with_owner().await
    }

    async fn update_status(&self, id: i32, status: TicketStatus) -> AppResult<()> {
        if self.uow.tickets().update_status(id, status).await? == 0 {
            return Err(AppError::not_found("Ticket"));
        }
        tracing::info!(ticket_id = id, %status, "Ticket status updated");
        Ok(())
    }

    async fn delete_ticket(&self, id: i32) -> AppResult<DeletedTicket> {
        let archived = with_transaction!(self.uow, |ctx| {
            let ticket = ctx
                .tickets()
                .find_with_owner(id)
                .await?
                .ok_or_not_found("Ticket")?;

            let archived = ctx.archive().archive(&ticket).await?;
            ctx.tickets().delete(id).await?;
            Ok(archived)
        })?;

        tracing::info!(ticket_id = id, archive_id = archived.id, "Ticket deleted and archived");
        Ok(archived)
    }

    async fn recent_deletions(&self) -> AppResult<Vec<DeletedTicket>> {
        self.uow.archive().recent(DELETED_TICKET_HISTORY_LIMIT).await
    }
}
