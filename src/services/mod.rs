//! Service layer for eLoan
//!
//! Business logic on top of the storage layer: validation, uniqueness,
//! encryption of sensitive fields, and cross-entity reads.

pub mod application;
pub mod loan;
pub mod schedule;
pub mod ticket;
pub mod user;

pub use application::{
    ApplicationDetail, ApplicationOverview, ApplicationRequest, ApplicationService,
    ApplicationSummary,
};
pub use loan::{LoanProductInput, LoanService};
pub use schedule::ScheduleService;
pub use ticket::{ReplyView, TicketService, TicketThread};
pub use user::{Profile, ProfileUpdate, Registration, UserService};
