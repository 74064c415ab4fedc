//! Loan product service
//!
//! Catalog management: create, list, find, update, and remove products.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{LoanError, LoanResult};
use crate::models::{LoanId, LoanProduct, Money};
use crate::storage::Storage;

/// Fields describing a loan product; used for create and update
#[derive(Debug, Clone)]
pub struct LoanProductInput {
    pub name: String,
    pub description: String,
    pub annual_rate_percent: Decimal,
    pub processing_fee_percent: Decimal,
    pub min_amount: Money,
    pub max_amount: Money,
    pub tenure_months: u32,
    pub required_docs: String,
    pub eligibility_info: String,
}

/// Service for catalog management
pub struct LoanService<'a> {
    storage: &'a Storage,
}

impl<'a> LoanService<'a> {
    /// Create a new loan service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a product to the catalog
    pub fn create(&self, input: LoanProductInput) -> LoanResult<LoanProduct> {
        let name = input.name.trim().to_string();
        if self.storage.loans.name_exists(&name, None)? {
            return Err(LoanError::Duplicate {
                entity_type: "Loan product",
                identifier: name,
            });
        }

        let mut product = LoanProduct::new(
            name,
            input.annual_rate_percent,
            input.min_amount,
            input.max_amount,
            input.tenure_months,
        );
        product.description = input.description;
        product.processing_fee_percent = input.processing_fee_percent;
        product.required_docs = input.required_docs;
        product.eligibility_info = input.eligibility_info;

        product
            .validate()
            .map_err(|e| LoanError::Validation(e.to_string()))?;

        self.storage.loans.upsert(product.clone())?;
        self.storage.loans.save()?;

        info!(loan = %product.id, name = %product.name, "added loan product");
        Ok(product)
    }

    /// Get a product by ID
    pub fn get(&self, id: LoanId) -> LoanResult<Option<LoanProduct>> {
        self.storage.loans.get(id)
    }

    /// Find a product by name or ID string
    pub fn find(&self, identifier: &str) -> LoanResult<Option<LoanProduct>> {
        if let Some(product) = self.storage.loans.get_by_name(identifier)? {
            return Ok(Some(product));
        }
        if let Ok(id) = identifier.parse::<LoanId>() {
            return self.storage.loans.get(id);
        }
        Ok(None)
    }

    /// List the catalog, sorted by name
    pub fn list(&self) -> LoanResult<Vec<LoanProduct>> {
        self.storage.loans.get_all()
    }

    /// Replace a product's fields
    pub fn update(&self, id: LoanId, input: LoanProductInput) -> LoanResult<LoanProduct> {
        let mut product = self
            .storage
            .loans
            .get(id)?
            .ok_or_else(|| LoanError::loan_not_found(id.to_string()))?;

        let name = input.name.trim().to_string();
        if self.storage.loans.name_exists(&name, Some(id))? {
            return Err(LoanError::Duplicate {
                entity_type: "Loan product",
                identifier: name,
            });
        }

        product.name = name;
        product.description = input.description;
        product.annual_rate_percent = input.annual_rate_percent;
        product.processing_fee_percent = input.processing_fee_percent;
        product.min_amount = input.min_amount;
        product.max_amount = input.max_amount;
        product.tenure_months = input.tenure_months;
        product.required_docs = input.required_docs;
        product.eligibility_info = input.eligibility_info;
        product.updated_at = chrono::Utc::now();

        product
            .validate()
            .map_err(|e| LoanError::Validation(e.to_string()))?;

        self.storage.loans.upsert(product.clone())?;
        self.storage.loans.save()?;

        Ok(product)
    }

    /// Remove a product from the catalog
    pub fn delete(&self, id: LoanId) -> LoanResult<()> {
        if !self.storage.loans.delete(id)? {
            return Err(LoanError::loan_not_found(id.to_string()));
        }
        self.storage.loans.save()?;

        info!(loan = %id, "removed loan product");
        Ok(())
    }
}
