//! Infrastructure layer - External systems integration
//!
//! Database connections, repositories and the Unit of Work
//! used for transactional workflows.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ArchiveRepository, ArchiveStore, NoteRepository, NoteStore, TicketRepository, TicketStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxArchiveRepository, TxTicketRepository, TxUserRepository,
    UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockArchiveRepository, MockNoteRepository, MockTicketRepository, MockUserRepository,
};
