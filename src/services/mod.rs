//! Service layer - Business logic
//!
//! Services orchestrate domain operations over the Unit of Work.
//! Authorization is decided at the HTTP boundary; services enforce
//! validation, existence and uniqueness rules.

mod auth_service;
mod container;
mod note_service;
mod ticket_service;
mod user_service;

pub use auth_service::{AuthService, AuthSession, Authenticator, Claims};
pub use container::{ServiceContainer, Services};
pub use note_service::{NoteManager, NoteService};
pub use ticket_service::{TicketManager, TicketService};
pub use user_service::{ProfileUpdate, UserManager, UserService};
