//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod application;
pub mod loan;
pub mod ticket;
pub mod user;

pub use application::{handle_application_command, ApplicationCommands};
pub use loan::{handle_loan_command, LoanCommands};
pub use ticket::{handle_ticket_command, TicketCommands};
pub use user::{handle_user_command, UserCommands};
