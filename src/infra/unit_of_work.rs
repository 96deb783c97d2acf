//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-step workflows atomically.
//! The transactional repositories borrow the open transaction, so every
//! statement issued through a [`TransactionContext`] commits or rolls back together.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    self, ArchiveRepository, ArchiveStore, NoteRepository, NoteStore, TicketRepository,
    TicketStore, UserRepository, UserStore,
};
use crate::domain::{DeletedTicket, ProfileChanges, TicketWithOwner};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods;
/// services are tested through their own traits or against SQLite.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn tickets(&self) -> Arc<dyn TicketRepository>;

    fn notes(&self) -> Arc<dyn NoteRepository>;

    fn archive(&self) -> Arc<dyn ArchiveRepository>;

    /// Execute a closure within a Serializable transaction.
    ///
    /// Committed on `Ok`, rolled back on `Err`.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn tickets(&self) -> TxTicketRepository<'_> {
        TxTicketRepository { txn: self.txn }
    }

    pub fn archive(&self) -> TxArchiveRepository<'_> {
        TxArchiveRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    ticket_repo: Arc<TicketStore>,
    note_repo: Arc<NoteStore>,
    archive_repo: Arc<ArchiveStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            ticket_repo: Arc::new(TicketStore::new(db.clone())),
            note_repo: Arc::new(NoteStore::new(db.clone())),
            archive_repo: Arc::new(ArchiveStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn tickets(&self) -> Arc<dyn TicketRepository> {
        self.ticket_repo.clone()
    }

    fn notes(&self) -> Arc<dyn NoteRepository> {
        self.note_repo.clone()
    }

    fn archive(&self) -> Arc<dyn ArchiveRepository> {
        self.archive_repo.clone()
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    /// Whether another account already uses `email`
    pub async fn email_taken_by_other(&self, email: &str, id: i32) -> AppResult<bool> {
        repositories::email_taken_by_other(self.txn, email, id).await
    }

    /// Apply the staged changes; `NotFound` when the row is gone
    pub async fn update_profile(&self, id: i32, changes: ProfileChanges) -> AppResult<()> {
        let affected = repositories::update_profile(self.txn, id, changes).await?;
        if affected == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }
}

/// Transaction-aware ticket repository.
pub struct TxTicketRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTicketRepository<'a> {
    pub async fn find_with_owner(&self, id: i32) -> AppResult<Option<TicketWithOwner>> {
        repositories::find_ticket_with_owner(self.txn, id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let affected = repositories::delete_ticket(self.txn, id).await?;
        if affected == 0 {
            return Err(AppError::not_found("Ticket"));
        }
        Ok(())
    }
}

/// Transaction-aware archive repository.
pub struct TxArchiveRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxArchiveRepository<'a> {
    pub async fn archive(&self, ticket: &TicketWithOwner) -> AppResult<DeletedTicket> {
        repositories::archive_ticket(self.txn, ticket).await
    }
}

/// Shorthand for running a block inside a Serializable transaction.
///
/// `with_transaction!(uow, |ctx| body)`
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction_serializable(|$ctx| Box::pin(async move { $body }))
            .await
    };
}
