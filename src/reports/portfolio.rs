//! Portfolio statistics
//!
//! The admin dashboard numbers: how many borrowers, products, and
//! applications exist, the total amount requested, and a per-status
//! breakdown of the application pipeline.

use crate::error::LoanResult;
use crate::models::{ApplicationStatus, Money, UserRole};
use crate::storage::Storage;

/// Aggregated lending figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioStats {
    pub total_borrowers: usize,
    pub total_products: usize,
    pub total_applications: usize,
    pub total_amount_requested: Money,
    pub pending: usize,
    pub processing: usize,
    pub accepted: usize,
    pub disbursed: usize,
    pub rejected: usize,
}

/// Compute portfolio statistics over the stored data
pub fn portfolio_stats(storage: &Storage) -> LoanResult<PortfolioStats> {
    let applications = storage.applications.get_all()?;
    let total_amount_requested = applications.iter().map(|a| a.amount_required).sum();

    Ok(PortfolioStats {
        total_borrowers: storage.users.count_by_role(UserRole::User)?,
        total_products: storage.loans.count()?,
        total_applications: applications.len(),
        total_amount_requested,
        pending: storage
            .applications
            .count_by_status(ApplicationStatus::Pending)?,
        processing: storage
            .applications
            .count_by_status(ApplicationStatus::Processing)?,
        accepted: storage
            .applications
            .count_by_status(ApplicationStatus::AcceptedNotDisbursed)?,
        disbursed: storage
            .applications
            .count_by_status(ApplicationStatus::AcceptedDisbursed)?,
        rejected: storage
            .applications
            .count_by_status(ApplicationStatus::Rejected)?,
    })
}
