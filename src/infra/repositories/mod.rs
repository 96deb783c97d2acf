//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! The connection-generic functions are shared with the transactional
//! repositories in `unit_of_work`.

mod archive_repository;
pub(crate) mod entities;
mod note_repository;
mod ticket_repository;
mod user_repository;

pub use archive_repository::{ArchiveRepository, ArchiveStore};
pub use note_repository::{NoteRepository, NoteStore};
pub use ticket_repository::{TicketRepository, TicketStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use archive_repository::archive as archive_ticket;
pub(crate) use ticket_repository::{
    delete as delete_ticket, find_with_owner as find_ticket_with_owner,
};
pub(crate) use user_repository::{email_taken_by_other, update_profile};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use archive_repository::MockArchiveRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use note_repository::MockNoteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use ticket_repository::MockTicketRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
