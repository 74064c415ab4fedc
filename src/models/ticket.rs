//! Support ticket models
//!
//! A ticket opened by a borrower plus the thread of replies from the
//! borrower and administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TicketId, UserId};

/// Whether a ticket still needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Open,
    Closed,
}

impl TicketStatus {
    /// Parse a status from its stored/CLI string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A support request opened by a borrower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    /// Unique identifier
    pub id: TicketId,

    /// The borrower who opened the ticket
    pub user_id: UserId,

    /// Short subject line
    pub subject: String,

    /// Initial message body
    pub message: String,

    /// Open/closed state
    #[serde(default)]
    pub status: TicketStatus,

    /// When the ticket was opened
    pub created_at: DateTime<Utc>,

    /// When the ticket last changed (status or new reply)
    pub updated_at: DateTime<Utc>,
}

impl SupportTicket {
    /// Open a new ticket
    pub fn new(user_id: UserId, subject: impl Into<String>, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            user_id,
            subject: subject.into(),
            message: message.into(),
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the open/closed state
    pub fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// One reply in a ticket's thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketReply {
    /// The ticket this reply belongs to
    pub ticket_id: TicketId,

    /// Author of the reply (borrower or admin)
    pub user_id: UserId,

    /// Reply body
    pub message: String,

    /// When the reply was posted
    pub created_at: DateTime<Utc>,
}

impl TicketReply {
    /// Post a reply
    pub fn new(ticket_id: TicketId, user_id: UserId, message: impl Into<String>) -> Self {
        Self {
            ticket_id,
            user_id,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
