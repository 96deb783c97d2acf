//! Ticket domain entity, its closed vocabularies, and the deletion archive record.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, STATUS_IN_PROGRESS, STATUS_PENDING,
    STATUS_RESOLVED,
};
use crate::errors::AppError;

/// Ticket priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketPriority {
    #[default]
    #[serde(rename = "bassa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => PRIORITY_LOW,
            TicketPriority::Medium => PRIORITY_MEDIUM,
            TicketPriority::High => PRIORITY_HIGH,
        }
    }
}

impl FromStr for TicketPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIORITY_LOW => Ok(TicketPriority::Low),
            PRIORITY_MEDIUM => Ok(TicketPriority::Medium),
            PRIORITY_HIGH => Ok(TicketPriority::High),
            _ => Err(AppError::validation(
                "Invalid priority value (expected one of: bassa, media, alta)",
            )),
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "In attesa")]
    Pending,
    #[serde(rename = "In lavorazione")]
    InProgress,
    #[serde(rename = "Risolto")]
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => STATUS_PENDING,
            TicketStatus::InProgress => STATUS_IN_PROGRESS,
            TicketStatus::Resolved => STATUS_RESOLVED,
        }
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(TicketStatus::Pending),
            STATUS_IN_PROGRESS => Ok(TicketStatus::InProgress),
            STATUS_RESOLVED => Ok(TicketStatus::Resolved),
            _ => Err(AppError::validation(
                "Invalid status value (expected one of: In attesa, In lavorazione, Risolto)",
            )),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Ticket {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = 7)]
    pub user_id: i32,
    #[schema(example = "Printer down")]
    pub title: String,
    #[schema(example = "The second floor printer does not respond")]
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// Ticket joined with its owner's contact details (admin view)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketWithOwner {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[schema(example = "Ann")]
    pub user_name: String,
    #[schema(example = "ann@x.com")]
    pub user_email: String,
}

/// Data for opening a ticket
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Snapshot of a deleted ticket; write-once
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedTicket {
    pub id: i32,
    pub original_id: i32,
    pub original_user_id: i32,
    /// Owner name captured at deletion time
    pub original_user_name: String,
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub deleted_at: DateTime<Utc>,
}
