//! Amortization schedule computation
//!
//! Pure, stateless reducing-balance EMI math. Consumed by the service layer
//! when a disbursed application's repayment plan is requested; never
//! persisted or cached.

pub mod engine;

pub use engine::{compute_schedule, RepaymentSchedule, ScheduleEntry};
