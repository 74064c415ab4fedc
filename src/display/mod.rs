//! Terminal output formatting
//!
//! Plain formatted text for tables and detail views.

pub mod application;
pub mod loan;
pub mod schedule;

pub use application::{
    format_application_detail, format_application_list, format_application_overview,
};
pub use loan::{format_loan_details, format_loan_list};
pub use schedule::format_schedule;
