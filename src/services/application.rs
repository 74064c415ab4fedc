//! Loan application service
//!
//! Submission with bank-detail encryption, borrower and admin listings,
//! the full admin detail view with PII decryption, and status review.

use tracing::info;

use crate::crypto::FieldCipher;
use crate::error::{LoanError, LoanResult};
use crate::models::{
    ApplicationId, ApplicationStatus, LoanApplication, LoanId, Money, UserId,
};
use crate::storage::Storage;

/// Input for submitting an application
#[derive(Debug, Clone)]
pub struct ApplicationRequest {
    pub user_id: UserId,
    pub loan_id: LoanId,
    pub amount_required: Money,
    pub account_holder_name: String,
    pub account_number: String,
    pub routing_code: String,
}

/// A borrower-facing listing row: the application joined with its product name
#[derive(Debug, Clone)]
pub struct ApplicationSummary {
    pub application: LoanApplication,
    pub loan_name: String,
}

/// An admin-facing listing row with borrower identity attached
#[derive(Debug, Clone)]
pub struct ApplicationOverview {
    pub application: LoanApplication,
    pub borrower_name: String,
    pub borrower_email: String,
    pub loan_name: String,
}

/// The full admin detail view; every sensitive field decrypted
#[derive(Debug, Clone)]
pub struct ApplicationDetail {
    pub application: LoanApplication,
    pub loan_name: String,
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrower_phone: String,
    pub borrower_national_id: String,
    pub borrower_tax_id: String,
    pub account_number: String,
    pub routing_code: String,
}

/// Service for loan application management
pub struct ApplicationService<'a> {
    storage: &'a Storage,
    cipher: &'a FieldCipher,
}

impl<'a> ApplicationService<'a> {
    /// Create a new application service
    pub fn new(storage: &'a Storage, cipher: &'a FieldCipher) -> Self {
        Self { storage, cipher }
    }

    /// Submit a new application
    ///
    /// Bank details are encrypted before the application is stored; the
    /// plaintext never reaches the storage layer.
    pub fn submit(&self, request: ApplicationRequest) -> LoanResult<LoanApplication> {
        let holder = request.account_holder_name.trim();
        if holder.is_empty() {
            return Err(LoanError::Validation("account holder name is required".into()));
        }
        if request.account_number.trim().is_empty() {
            return Err(LoanError::Validation("account number is required".into()));
        }
        if request.routing_code.trim().is_empty() {
            return Err(LoanError::Validation("routing code is required".into()));
        }

        let user = self
            .storage
            .users
            .get(request.user_id)?
            .ok_or_else(|| LoanError::user_not_found(request.user_id.to_string()))?;
        if !user.is_active() {
            return Err(LoanError::Validation("account is blocked".into()));
        }

        let product = self
            .storage
            .loans
            .get(request.loan_id)?
            .ok_or_else(|| LoanError::loan_not_found(request.loan_id.to_string()))?;

        if !request.amount_required.is_positive() {
            return Err(LoanError::Validation("amount must be positive".into()));
        }
        if !product.accepts_amount(request.amount_required) {
            return Err(LoanError::Validation(format!(
                "amount {} is outside the {}..{} band for {}",
                request.amount_required, product.min_amount, product.max_amount, product.name
            )));
        }

        let account_number_encrypted = self.cipher.encrypt(request.account_number.trim())?;
        let routing_code_encrypted = self.cipher.encrypt(request.routing_code.trim())?;

        let application = LoanApplication::new(
            request.user_id,
            request.loan_id,
            request.amount_required,
            holder,
            account_number_encrypted,
            routing_code_encrypted,
        );

        self.storage.applications.upsert(application.clone())?;
        self.storage.applications.save()?;

        info!(
            application = %application.id,
            user = %application.user_id,
            loan = %application.loan_id,
            "submitted loan application"
        );
        Ok(application)
    }

    /// Get one borrower's applications joined with product names, newest first
    pub fn list_for_user(&self, user_id: UserId) -> LoanResult<Vec<ApplicationSummary>> {
        let applications = self.storage.applications.get_by_user(user_id)?;
        let mut summaries = Vec::with_capacity(applications.len());

        for application in applications {
            let loan_name = self.loan_name(application.loan_id)?;
            summaries.push(ApplicationSummary {
                application,
                loan_name,
            });
        }

        Ok(summaries)
    }

    /// Admin listing with optional status filter and substring search over
    /// borrower name, borrower email, and product name
    ///
    /// Pending applications sort first, then newest first.
    pub fn list(
        &self,
        status: Option<ApplicationStatus>,
        search: Option<&str>,
    ) -> LoanResult<Vec<ApplicationOverview>> {
        let mut rows = Vec::new();

        for application in self.storage.applications.get_all()? {
            if let Some(wanted) = status {
                if application.status != wanted {
                    continue;
                }
            }

            let borrower = self
                .storage
                .users
                .get(application.user_id)?
                .ok_or_else(|| LoanError::user_not_found(application.user_id.to_string()))?;
            let loan_name = self.loan_name(application.loan_id)?;

            if let Some(query) = search {
                let query = query.to_lowercase();
                let matches = borrower.name.to_lowercase().contains(&query)
                    || borrower.email.to_lowercase().contains(&query)
                    || loan_name.to_lowercase().contains(&query);
                if !matches {
                    continue;
                }
            }

            rows.push(ApplicationOverview {
                application,
                borrower_name: borrower.name,
                borrower_email: borrower.email,
                loan_name,
            });
        }

        rows.sort_by(|a, b| {
            let a_pending = a.application.status == ApplicationStatus::Pending;
            let b_pending = b.application.status == ApplicationStatus::Pending;
            b_pending
                .cmp(&a_pending)
                .then(b.application.created_at.cmp(&a.application.created_at))
        });

        Ok(rows)
    }

    /// The full admin view of one application, with bank details and the
    /// borrower's identity fields decrypted
    pub fn detail(&self, id: ApplicationId) -> LoanResult<ApplicationDetail> {
        let application = self
            .storage
            .applications
            .get(id)?
            .ok_or_else(|| LoanError::application_not_found(id.to_string()))?;

        let borrower = self
            .storage
            .users
            .get(application.user_id)?
            .ok_or_else(|| LoanError::user_not_found(application.user_id.to_string()))?;
        let loan_name = self.loan_name(application.loan_id)?;

        let account_number = self.cipher.decrypt(&application.account_number_encrypted)?;
        let routing_code = self.cipher.decrypt(&application.routing_code_encrypted)?;
        let borrower_national_id = self.cipher.decrypt(&borrower.national_id_encrypted)?;
        let borrower_tax_id = self.cipher.decrypt(&borrower.tax_id_encrypted)?;

        Ok(ApplicationDetail {
            application,
            loan_name,
            borrower_name: borrower.name,
            borrower_email: borrower.email,
            borrower_phone: borrower.phone,
            borrower_national_id,
            borrower_tax_id,
            account_number,
            routing_code,
        })
    }

    /// Move an application to a new review state with an optional note
    pub fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        note: Option<String>,
    ) -> LoanResult<LoanApplication> {
        let mut application = self
            .storage
            .applications
            .get(id)?
            .ok_or_else(|| LoanError::application_not_found(id.to_string()))?;

        application.set_status(status, note);

        self.storage.applications.upsert(application.clone())?;
        self.storage.applications.save()?;

        info!(application = %application.id, %status, "updated application status");
        Ok(application)
    }

    fn loan_name(&self, loan_id: LoanId) -> LoanResult<String> {
        Ok(self
            .storage
            .loans
            .get(loan_id)?
            .map(|l| l.name)
            .unwrap_or_else(|| "(removed product)".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::EloanPaths;
    use crate::crypto::EncryptionKey;
    use crate::models::{LoanProduct, User, UserRole, UserStatus};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn setup() -> (TempDir, Storage, FieldCipher) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EloanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let cipher = FieldCipher::new(&EncryptionKey::from_hex(TEST_KEY).unwrap()).unwrap();
        (temp_dir, storage, cipher)
    }

    fn seed_user(storage: &Storage, cipher: &FieldCipher, email: &str) -> User {
        let user = User::new(
            "Asha Rao",
            email.replace(['@', '.'], ""),
            email,
            cipher.encrypt("1234-5678-9012").unwrap(),
            cipher.encrypt("ABCDE1234F").unwrap(),
            "$argon2id$hash".into(),
            UserRole::User,
        );
        storage.users.upsert(user.clone()).unwrap();
        user
    }

    fn seed_product(storage: &Storage, name: &str) -> LoanProduct {
        let product = LoanProduct::new(
            name,
            dec!(10),
            Money::from_units(10_000),
            Money::from_units(500_000),
            12,
        );
        storage.loans.upsert(product.clone()).unwrap();
        product
    }

    fn request(user: &User, product: &LoanProduct, amount: Money) -> ApplicationRequest {
        ApplicationRequest {
            user_id: user.id,
            loan_id: product.id,
            amount_required: amount,
            account_holder_name: "Asha Rao".into(),
            account_number: "00998877665544".into(),
            routing_code: "IFSC0001234".into(),
        }
    }

    #[test]
    fn test_submit_encrypts_bank_details() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let app = service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_ne!(app.account_number_encrypted, "00998877665544");
        assert_eq!(
            cipher.decrypt(&app.account_number_encrypted).unwrap(),
            "00998877665544"
        );
        assert_eq!(cipher.decrypt(&app.routing_code_encrypted).unwrap(), "IFSC0001234");
    }

    #[test]
    fn test_submit_validates_amount_band() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let too_small = service.submit(request(&user, &product, Money::from_units(5_000)));
        assert!(matches!(too_small, Err(LoanError::Validation(_))));

        let too_large = service.submit(request(&user, &product, Money::from_units(600_000)));
        assert!(matches!(too_large, Err(LoanError::Validation(_))));
    }

    #[test]
    fn test_submit_requires_bank_fields() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let mut missing = request(&user, &product, Money::from_units(100_000));
        missing.account_number = "  ".into();
        assert!(matches!(service.submit(missing), Err(LoanError::Validation(_))));
    }

    #[test]
    fn test_submit_rejects_blocked_user() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let mut user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        user.set_status(UserStatus::Blocked);
        storage.users.upsert(user.clone()).unwrap();

        let result = service.submit(request(&user, &product, Money::from_units(100_000)));
        assert!(matches!(result, Err(LoanError::Validation(_))));
    }

    #[test]
    fn test_submit_unknown_product() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");
        storage.loans.delete(product.id).unwrap();

        let result = service.submit(request(&user, &product, Money::from_units(100_000)));
        assert!(matches!(result, Err(LoanError::NotFound { .. })));
    }

    #[test]
    fn test_list_for_user_joins_product_name() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();

        let summaries = service.list_for_user(user.id).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].loan_name, "Gold Personal Loan");
    }

    #[test]
    fn test_admin_list_filters_and_sorts_pending_first() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let first = service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();
        let second = service
            .submit(request(&user, &product, Money::from_units(200_000)))
            .unwrap();
        service
            .set_status(first.id, ApplicationStatus::Rejected, Some("incomplete docs".into()))
            .unwrap();

        let all = service.list(None, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].application.id, second.id, "pending sorts first");

        let rejected = service.list(Some(ApplicationStatus::Rejected), None).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].application.id, first.id);

        let hits = service.list(None, Some("gold")).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(service.list(None, Some("platinum")).unwrap().is_empty());
    }

    #[test]
    fn test_detail_decrypts_everything() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let app = service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();

        let detail = service.detail(app.id).unwrap();
        assert_eq!(detail.account_number, "00998877665544");
        assert_eq!(detail.routing_code, "IFSC0001234");
        assert_eq!(detail.borrower_national_id, "1234-5678-9012");
        assert_eq!(detail.borrower_tax_id, "ABCDE1234F");
        assert_eq!(detail.loan_name, "Gold Personal Loan");
    }

    #[test]
    fn test_detail_surfaces_tampered_field() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let mut app = service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();
        app.account_number_encrypted = "aa:bb".into();
        storage.applications.upsert(app.clone()).unwrap();

        assert!(matches!(service.detail(app.id), Err(LoanError::Decryption(_))));
    }

    #[test]
    fn test_set_status_replaces_note() {
        let (_tmp, storage, cipher) = setup();
        let service = ApplicationService::new(&storage, &cipher);
        let user = seed_user(&storage, &cipher, "asha@example.com");
        let product = seed_product(&storage, "Gold Personal Loan");

        let app = service
            .submit(request(&user, &product, Money::from_units(100_000)))
            .unwrap();

        let updated = service
            .set_status(
                app.id,
                ApplicationStatus::AcceptedDisbursed,
                Some("funds released".into()),
            )
            .unwrap();
        assert!(updated.status.is_disbursed());
        assert_eq!(updated.note.as_deref(), Some("funds released"));

        let cleared = service
            .set_status(app.id, ApplicationStatus::Processing, None)
            .unwrap();
        assert!(cleared.note.is_none());
    }
}
