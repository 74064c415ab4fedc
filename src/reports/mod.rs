//! Reporting for eLoan
//!
//! Read-only aggregations over stored data.

pub mod portfolio;

pub use portfolio::{portfolio_stats, PortfolioStats};
