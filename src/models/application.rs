//! Loan application model
//!
//! A borrower's request for one catalog product. Bank details are stored as
//! opaque serialized ciphertext produced by the field cipher; the model never
//! sees them in the clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ApplicationId, LoanId, UserId};
use super::money::Money;

/// Review state of a loan application
///
/// Serialized in kebab-case so stored records carry the same status strings
/// as the previous generation of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    /// Submitted, not yet reviewed
    #[default]
    Pending,
    /// Under review
    Processing,
    /// Approved, funds not yet transferred
    AcceptedNotDisbursed,
    /// Approved and funds transferred
    AcceptedDisbursed,
    /// Declined
    Rejected,
}

impl ApplicationStatus {
    /// Parse a status from its stored/CLI string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "accepted-not-disbursed" => Some(Self::AcceptedNotDisbursed),
            "accepted-disbursed" => Some(Self::AcceptedDisbursed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::AcceptedNotDisbursed => "accepted-not-disbursed",
            Self::AcceptedDisbursed => "accepted-disbursed",
            Self::Rejected => "rejected",
        }
    }

    /// Whether funds have been transferred for this application
    pub fn is_disbursed(&self) -> bool {
        matches!(self, Self::AcceptedDisbursed)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrower's application for a loan product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Unique identifier
    pub id: ApplicationId,

    /// The applying borrower
    pub user_id: UserId,

    /// The catalog product applied for
    pub loan_id: LoanId,

    /// Principal requested
    pub amount_required: Money,

    /// Name on the disbursement account (not sensitive; stored in the clear)
    pub account_holder_name: String,

    /// Disbursement account number, encrypted (iv:tag:ciphertext)
    pub account_number_encrypted: String,

    /// Bank routing/branch code, encrypted (iv:tag:ciphertext)
    pub routing_code_encrypted: String,

    /// Current review state
    #[serde(default)]
    pub status: ApplicationStatus,

    /// Reviewer note attached with the latest status change
    #[serde(default)]
    pub note: Option<String>,

    /// When the application was submitted
    pub created_at: DateTime<Utc>,

    /// When the application was last modified
    pub updated_at: DateTime<Utc>,
}

impl LoanApplication {
    /// Create a new pending application
    pub fn new(
        user_id: UserId,
        loan_id: LoanId,
        amount_required: Money,
        account_holder_name: impl Into<String>,
        account_number_encrypted: String,
        routing_code_encrypted: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new(),
            user_id,
            loan_id,
            amount_required,
            account_holder_name: account_holder_name.into(),
            account_number_encrypted,
            routing_code_encrypted,
            status: ApplicationStatus::Pending,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move the application to a new review state, replacing the note
    pub fn set_status(&mut self, status: ApplicationStatus, note: Option<String>) {
        self.status = status;
        self.note = note;
        self.updated_at = Utc::now();
    }
}
