//! Support ticket repository for JSON storage
//!
//! Tickets and their reply threads live in one file, tickets.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LoanError;
use crate::models::{SupportTicket, TicketId, TicketReply, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TicketData {
    tickets: Vec<SupportTicket>,
    replies: Vec<TicketReply>,
}

#[derive(Default)]
struct TicketStore {
    tickets: HashMap<TicketId, SupportTicket>,
    replies: Vec<TicketReply>,
}

/// Repository for ticket and reply persistence
pub struct TicketRepository {
    path: PathBuf,
    data: RwLock<TicketStore>,
}

impl TicketRepository {
    /// Create a new ticket repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(TicketStore::default()),
        }
    }

    /// Load tickets and replies from disk
    pub fn load(&self) -> Result<(), LoanError> {
        let file_data: TicketData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.tickets.clear();
        for ticket in file_data.tickets {
            data.tickets.insert(ticket.id, ticket);
        }
        data.replies = file_data.replies;

        Ok(())
    }

    /// Save tickets and replies to disk
    pub fn save(&self) -> Result<(), LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TicketData {
            tickets: data.tickets.values().cloned().collect(),
            replies: data.replies.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a ticket by ID
    pub fn get(&self, id: TicketId) -> Result<Option<SupportTicket>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.tickets.get(&id).cloned())
    }

    /// Get all tickets, most recently updated first
    pub fn get_all(&self) -> Result<Vec<SupportTicket>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut tickets: Vec<_> = data.tickets.values().cloned().collect();
        tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(tickets)
    }

    /// Get one borrower's tickets, most recently updated first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<SupportTicket>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut tickets: Vec<_> = data
            .tickets
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(tickets)
    }

    /// Get a ticket's replies, oldest first
    pub fn replies_for(&self, ticket_id: TicketId) -> Result<Vec<TicketReply>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut replies: Vec<_> = data
            .replies
            .iter()
            .filter(|r| r.ticket_id == ticket_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(replies)
    }

    /// Insert or update a ticket
    pub fn upsert(&self, ticket: SupportTicket) -> Result<(), LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    /// Append a reply to a ticket's thread
    pub fn add_reply(&self, reply: TicketReply) -> Result<(), LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.replies.push(reply);
        Ok(())
    }

    /// Delete a user's tickets and every reply on them, plus the user's
    /// replies on other tickets; returns how many tickets were removed
    pub fn delete_by_user(&self, user_id: UserId) -> Result<usize, LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed: Vec<TicketId> = data
            .tickets
            .values()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.id)
            .collect();

        for id in &removed {
            data.tickets.remove(id);
        }
        data.replies
            .retain(|r| r.user_id != user_id && !removed.contains(&r.ticket_id));

        Ok(removed.len())
    }
}
