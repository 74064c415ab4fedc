//! Support ticket service
//!
//! Ticket creation, threaded replies, and open/closed state. A reply to a
//! closed ticket re-opens it.

use tracing::info;

use crate::error::{LoanError, LoanResult};
use crate::models::{SupportTicket, TicketId, TicketReply, TicketStatus, UserId, UserRole};
use crate::storage::Storage;

/// One reply with the author's identity resolved
#[derive(Debug, Clone)]
pub struct ReplyView {
    pub author_name: String,
    pub author_role: UserRole,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A ticket with its full reply thread
#[derive(Debug, Clone)]
pub struct TicketThread {
    pub ticket: SupportTicket,
    pub replies: Vec<ReplyView>,
}

/// Service for support ticket management
pub struct TicketService<'a> {
    storage: &'a Storage,
}

impl<'a> TicketService<'a> {
    /// Create a new ticket service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Open a ticket on behalf of a borrower
    pub fn open(&self, user_id: UserId, subject: &str, message: &str) -> LoanResult<SupportTicket> {
        let subject = subject.trim();
        let message = message.trim();
        if subject.is_empty() || message.is_empty() {
            return Err(LoanError::Validation("subject and message are required".into()));
        }
        if self.storage.users.get(user_id)?.is_none() {
            return Err(LoanError::user_not_found(user_id.to_string()));
        }

        let ticket = SupportTicket::new(user_id, subject, message);

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        info!(ticket = %ticket.id, user = %user_id, "opened support ticket");
        Ok(ticket)
    }

    /// One borrower's tickets, most recently updated first
    pub fn list_for_user(&self, user_id: UserId) -> LoanResult<Vec<SupportTicket>> {
        self.storage.tickets.get_by_user(user_id)
    }

    /// All tickets, open ones first, then most recently updated
    pub fn list(&self) -> LoanResult<Vec<SupportTicket>> {
        let mut tickets = self.storage.tickets.get_all()?;
        tickets.sort_by(|a, b| {
            let a_open = a.status == TicketStatus::Open;
            let b_open = b.status == TicketStatus::Open;
            b_open.cmp(&a_open).then(b.updated_at.cmp(&a.updated_at))
        });
        Ok(tickets)
    }

    /// A ticket and its reply thread, with author identities resolved
    ///
    /// When `requester` is given, the ticket must belong to that user;
    /// admin callers pass `None`.
    pub fn thread(&self, id: TicketId, requester: Option<UserId>) -> LoanResult<TicketThread> {
        let ticket = self
            .storage
            .tickets
            .get(id)?
            .filter(|t| requester.is_none() || requester == Some(t.user_id))
            .ok_or_else(|| LoanError::ticket_not_found(id.to_string()))?;

        let mut replies = Vec::new();
        for reply in self.storage.tickets.replies_for(id)? {
            let author = self.storage.users.get(reply.user_id)?;
            let (author_name, author_role) = match author {
                Some(user) => (user.name, user.role),
                None => ("(removed user)".to_string(), UserRole::User),
            };
            replies.push(ReplyView {
                author_name,
                author_role,
                message: reply.message,
                created_at: reply.created_at,
            });
        }

        Ok(TicketThread { ticket, replies })
    }

    /// Post a reply; re-opens the ticket if it was closed
    pub fn reply(
        &self,
        id: TicketId,
        author: UserId,
        message: &str,
        requester: Option<UserId>,
    ) -> LoanResult<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LoanError::Validation("message is required".into()));
        }

        let mut ticket = self
            .storage
            .tickets
            .get(id)?
            .filter(|t| requester.is_none() || requester == Some(t.user_id))
            .ok_or_else(|| LoanError::ticket_not_found(id.to_string()))?;

        self.storage
            .tickets
            .add_reply(TicketReply::new(id, author, message))?;

        // Any reply puts the ticket back in front of the support queue
        ticket.set_status(TicketStatus::Open);
        self.storage.tickets.upsert(ticket)?;
        self.storage.tickets.save()?;

        Ok(())
    }

    /// Set a ticket's open/closed state
    pub fn set_status(&self, id: TicketId, status: TicketStatus) -> LoanResult<SupportTicket> {
        let mut ticket = self
            .storage
            .tickets
            .get(id)?
            .ok_or_else(|| LoanError::ticket_not_found(id.to_string()))?;

        ticket.set_status(status);

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        info!(ticket = %ticket.id, %status, "updated ticket status");
        Ok(ticket)
    }
}
