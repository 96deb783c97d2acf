//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, NoteService, ServiceContainer, Services, TicketService, UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub ticket_service: Arc<dyn TicketService>,
    pub note_service: Arc<dyn NoteService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    /// Per-request timeout applied by the router
    pub request_timeout: std::time::Duration,
}

impl AppState {
    /// Wire all services over the pool held by `database`.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let request_timeout = config.request_timeout();
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(container, database, request_timeout)
    }

    /// Build state from an existing service container.
    pub fn new(
        container: impl ServiceContainer,
        database: Arc<Database>,
        request_timeout: std::time::Duration,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            ticket_service: container.tickets(),
            note_service: container.notes(),
            database,
            request_timeout,
        }
    }
}
