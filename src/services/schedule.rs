//! Repayment schedule service
//!
//! Bridges an application to the amortization engine: the principal comes
//! from the application, the rate and tenure from its catalog product, and
//! a plan exists only once funds have actually been disbursed.

use crate::error::{LoanError, LoanResult};
use crate::models::{ApplicationId, UserId};
use crate::schedule::{compute_schedule, RepaymentSchedule};
use crate::storage::Storage;

/// Service for repayment plan computation
pub struct ScheduleService<'a> {
    storage: &'a Storage,
}

impl<'a> ScheduleService<'a> {
    /// Create a new schedule service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Compute the repayment plan for an application
    ///
    /// When `requester` is given, the application must belong to that user;
    /// a foreign application is reported as not found rather than revealing
    /// its existence. The plan is recomputed on every call and never stored.
    pub fn repayment_schedule(
        &self,
        id: ApplicationId,
        requester: Option<UserId>,
    ) -> LoanResult<RepaymentSchedule> {
        let application = self
            .storage
            .applications
            .get(id)?
            .filter(|a| requester.is_none() || requester == Some(a.user_id))
            .ok_or_else(|| LoanError::application_not_found(id.to_string()))?;

        if !application.status.is_disbursed() {
            return Err(LoanError::Validation(
                "repayment schedule is only available for disbursed loans".into(),
            ));
        }

        let product = self
            .storage
            .loans
            .get(application.loan_id)?
            .ok_or_else(|| LoanError::loan_not_found(application.loan_id.to_string()))?;

        compute_schedule(
            application.amount_required,
            product.annual_rate_percent,
            product.tenure_months,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::EloanPaths;
    use crate::models::{
        ApplicationStatus, LoanApplication, LoanProduct, Money, User, UserRole,
    };
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EloanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage, status: ApplicationStatus) -> (UserId, LoanApplication) {
        let user = User::new(
            "Asha Rao",
            "9000000001",
            "asha@example.com",
            "aa:bb:cc".into(),
            "dd:ee:ff".into(),
            "$argon2id$hash".into(),
            UserRole::User,
        );
        let product = LoanProduct::new(
            "Gold Personal Loan",
            dec!(10),
            Money::from_units(10_000),
            Money::from_units(500_000),
            12,
        );
        let mut application = LoanApplication::new(
            user.id,
            product.id,
            Money::from_units(100_000),
            "Asha Rao",
            "aa:bb:cc".into(),
            "dd:ee:ff".into(),
        );
        application.set_status(status, None);

        storage.users.upsert(user.clone()).unwrap();
        storage.loans.upsert(product).unwrap();
        storage.applications.upsert(application.clone()).unwrap();
        (user.id, application)
    }

    #[test]
    fn test_schedule_for_disbursed_application() {
        let (_tmp, storage) = setup();
        let (user_id, application) = seed(&storage, ApplicationStatus::AcceptedDisbursed);
        let service = ScheduleService::new(&storage);

        let schedule = service
            .repayment_schedule(application.id, Some(user_id))
            .unwrap();

        assert_eq!(schedule.entries.len(), 12);
        assert_eq!(schedule.installment, Money::from_cents(879_159));
        assert_eq!(schedule.entries.last().unwrap().remaining_balance, Money::zero());
    }

    #[test]
    fn test_schedule_refused_before_disbursal() {
        let (_tmp, storage) = setup();
        let service = ScheduleService::new(&storage);

        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Processing,
            ApplicationStatus::AcceptedNotDisbursed,
            ApplicationStatus::Rejected,
        ] {
            let (user_id, application) = seed(&storage, status);
            let result = service.repayment_schedule(application.id, Some(user_id));
            assert!(
                matches!(result, Err(LoanError::Validation(_))),
                "{} must not yield a schedule",
                status
            );
        }
    }

    #[test]
    fn test_foreign_application_reads_as_not_found() {
        let (_tmp, storage) = setup();
        let (_owner, application) = seed(&storage, ApplicationStatus::AcceptedDisbursed);
        let service = ScheduleService::new(&storage);

        let stranger = UserId::new();
        let result = service.repayment_schedule(application.id, Some(stranger));
        assert!(matches!(result, Err(LoanError::NotFound { .. })));

        // Without a requester (admin path) the same application resolves
        assert!(service.repayment_schedule(application.id, None).is_ok());
    }

    #[test]
    fn test_missing_product_is_reported() {
        let (_tmp, storage) = setup();
        let (user_id, application) = seed(&storage, ApplicationStatus::AcceptedDisbursed);
        storage.loans.delete(application.loan_id).unwrap();
        let service = ScheduleService::new(&storage);

        let result = service.repayment_schedule(application.id, Some(user_id));
        assert!(matches!(result, Err(LoanError::NotFound { .. })));
    }
}
