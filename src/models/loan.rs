//! Loan product model
//!
//! A catalog entry describing one kind of loan on offer: its rate, tenure,
//! amount band, and the paperwork a borrower needs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LoanId;
use super::money::Money;

/// A loan product offered in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProduct {
    /// Unique identifier
    pub id: LoanId,

    /// Product name (e.g., "Gold Personal Loan")
    pub name: String,

    /// Free-form product description
    #[serde(default)]
    pub description: String,

    /// Annual interest rate as a percentage (e.g., 10.5)
    pub annual_rate_percent: Decimal,

    /// One-time processing fee as a percentage of the principal
    #[serde(default)]
    pub processing_fee_percent: Decimal,

    /// Smallest amount that can be applied for
    pub min_amount: Money,

    /// Largest amount that can be applied for
    pub max_amount: Money,

    /// Repayment tenure in months
    pub tenure_months: u32,

    /// Documents the applicant must provide
    #[serde(default)]
    pub required_docs: String,

    /// Eligibility notes shown to applicants
    #[serde(default)]
    pub eligibility_info: String,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last modified
    pub updated_at: DateTime<Utc>,
}

impl LoanProduct {
    /// Create a new product with empty descriptive fields
    pub fn new(
        name: impl Into<String>,
        annual_rate_percent: Decimal,
        min_amount: Money,
        max_amount: Money,
        tenure_months: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LoanId::new(),
            name: name.into(),
            description: String::new(),
            annual_rate_percent,
            processing_fee_percent: Decimal::ZERO,
            min_amount,
            max_amount,
            tenure_months,
            required_docs: String::new(),
            eligibility_info: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether an amount falls inside this product's band
    pub fn accepts_amount(&self, amount: Money) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    /// Validate the product
    pub fn validate(&self) -> Result<(), LoanProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(LoanProductValidationError::EmptyName);
        }
        if self.annual_rate_percent <= Decimal::ZERO {
            return Err(LoanProductValidationError::NonPositiveRate);
        }
        if self.processing_fee_percent < Decimal::ZERO {
            return Err(LoanProductValidationError::NegativeProcessingFee);
        }
        if !self.min_amount.is_positive() {
            return Err(LoanProductValidationError::NonPositiveMinimum);
        }
        if self.min_amount > self.max_amount {
            return Err(LoanProductValidationError::InvertedAmountBand);
        }
        if self.tenure_months == 0 {
            return Err(LoanProductValidationError::ZeroTenure);
        }
        Ok(())
    }
}

impl fmt::Display for LoanProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}% / {} months)",
            self.name, self.annual_rate_percent, self.tenure_months
        )
    }
}

/// Validation errors for loan products
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanProductValidationError {
    EmptyName,
    NonPositiveRate,
    NegativeProcessingFee,
    NonPositiveMinimum,
    InvertedAmountBand,
    ZeroTenure,
}

impl fmt::Display for LoanProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Product name cannot be empty"),
            Self::NonPositiveRate => write!(f, "Annual interest rate must be positive"),
            Self::NegativeProcessingFee => write!(f, "Processing fee cannot be negative"),
            Self::NonPositiveMinimum => write!(f, "Minimum amount must be positive"),
            Self::InvertedAmountBand => {
                write!(f, "Minimum amount cannot exceed maximum amount")
            }
            Self::ZeroTenure => write!(f, "Tenure must be at least one month"),
        }
    }
}

impl std::error::Error for LoanProductValidationError {}
