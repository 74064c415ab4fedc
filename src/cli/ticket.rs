//! Support ticket CLI commands

use clap::Subcommand;

use crate::crypto::FieldCipher;
use crate::error::{LoanError, LoanResult};
use crate::models::{TicketId, TicketStatus, UserRole};
use crate::services::{TicketService, UserService};
use crate::storage::Storage;

/// Support ticket subcommands
#[derive(Subcommand)]
pub enum TicketCommands {
    /// Open a ticket for a borrower
    Open {
        /// Borrower's email, phone, or user ID
        borrower: String,
        /// Subject line
        #[arg(short, long)]
        subject: String,
        /// Message body
        #[arg(short, long)]
        message: String,
    },
    /// List tickets (all of them, or one borrower's)
    List {
        /// Limit to one borrower's tickets
        #[arg(short, long)]
        borrower: Option<String>,
    },
    /// Show a ticket and its reply thread
    Show {
        /// Ticket ID
        id: String,
        /// Restrict access to this borrower
        #[arg(short, long)]
        borrower: Option<String>,
    },
    /// Reply to a ticket (re-opens it if closed)
    Reply {
        /// Ticket ID
        id: String,
        /// Author's email, phone, or user ID
        #[arg(short, long)]
        author: String,
        /// Reply body
        #[arg(short, long)]
        message: String,
    },
    /// Set a ticket's status (open or closed)
    SetStatus {
        /// Ticket ID
        id: String,
        /// New status
        status: String,
    },
}

fn parse_ticket_id(s: &str) -> LoanResult<TicketId> {
    s.parse()
        .map_err(|_| LoanError::Validation(format!("Invalid ticket ID: '{}'", s)))
}

/// Handle a support ticket command
pub fn handle_ticket_command(
    storage: &Storage,
    cipher: &FieldCipher,
    cmd: TicketCommands,
) -> LoanResult<()> {
    let service = TicketService::new(storage);
    let users = UserService::new(storage, cipher);

    match cmd {
        TicketCommands::Open {
            borrower,
            subject,
            message,
        } => {
            let user = users
                .find(&borrower)?
                .ok_or_else(|| LoanError::user_not_found(&borrower))?;
            let ticket = service.open(user.id, &subject, &message)?;
            println!("Opened ticket {}: {}", ticket.id, ticket.subject);
        }

        TicketCommands::List { borrower } => {
            let tickets = match borrower {
                Some(identifier) => {
                    let user = users
                        .find(&identifier)?
                        .ok_or_else(|| LoanError::user_not_found(&identifier))?;
                    service.list_for_user(user.id)?
                }
                None => service.list()?,
            };

            if tickets.is_empty() {
                println!("No tickets found.");
            } else {
                for ticket in tickets {
                    println!(
                        "{:<40}  {:<7}  {}",
                        ticket.id.to_string(),
                        ticket.status.to_string(),
                        ticket.subject
                    );
                }
            }
        }

        TicketCommands::Show { id, borrower } => {
            let requester = match borrower {
                Some(identifier) => Some(
                    users
                        .find(&identifier)?
                        .ok_or_else(|| LoanError::user_not_found(&identifier))?
                        .id,
                ),
                None => None,
            };

            let thread = service.thread(parse_ticket_id(&id)?, requester)?;
            println!("Subject: {}", thread.ticket.subject);
            println!("Status:  {}", thread.ticket.status);
            println!();
            println!("{}", thread.ticket.message);
            for reply in thread.replies {
                println!();
                println!("--- {} ({}) ---", reply.author_name, reply.author_role);
                println!("{}", reply.message);
            }
        }

        TicketCommands::Reply { id, author, message } => {
            let user = users
                .find(&author)?
                .ok_or_else(|| LoanError::user_not_found(&author))?;
            // Borrowers may only reply on their own tickets; admins anywhere
            let requester = (user.role == UserRole::User).then_some(user.id);

            service.reply(parse_ticket_id(&id)?, user.id, &message, requester)?;
            println!("Reply posted.");
        }

        TicketCommands::SetStatus { id, status } => {
            let status = TicketStatus::parse(&status).ok_or_else(|| {
                LoanError::Validation(format!(
                    "Invalid status: '{}'. Valid statuses: open, closed",
                    status
                ))
            })?;
            let ticket = service.set_status(parse_ticket_id(&id)?, status)?;
            println!("Ticket {} is now {}.", ticket.id, ticket.status);
        }
    }

    Ok(())
}
