//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod deleted_ticket;
pub mod note;
pub mod ticket;
pub mod user;
