//! Core data models for eLoan
//!
//! This module contains the data structures that represent the lending
//! domain: users, loan products, applications, and support tickets.

pub mod application;
pub mod ids;
pub mod loan;
pub mod money;
pub mod ticket;
pub mod user;

pub use application::{ApplicationStatus, LoanApplication};
pub use ids::{ApplicationId, LoanId, TicketId, UserId};
pub use loan::LoanProduct;
pub use money::Money;
pub use ticket::{SupportTicket, TicketReply, TicketStatus};
pub use user::{User, UserRole, UserStatus};
