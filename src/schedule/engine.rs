//! Reducing-balance repayment schedule engine
//!
//! Converts a principal, annual interest rate, and tenure into a fixed
//! monthly installment and a month-by-month breakdown of each payment into
//! its interest and principal components.
//!
//! Accumulation runs in `Decimal` at full precision; amounts are rounded to
//! cents only when an entry is emitted. Each entry's principal component is
//! the difference of the rounded cumulative principal paid, so the
//! components always sum to the principal exactly and the final entry's
//! remaining balance is exactly zero.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{LoanError, LoanResult};
use crate::models::Money;

/// One month of a repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Month index, 1-based
    pub month: u32,
    /// Portion of this installment that pays down the principal
    pub principal_component: Money,
    /// Portion of this installment that pays interest on the open balance
    pub interest_component: Money,
    /// The fixed monthly installment
    pub installment: Money,
    /// Balance still owed after this installment
    pub remaining_balance: Money,
}

/// A complete fixed-installment repayment plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepaymentSchedule {
    /// Fixed monthly installment (EMI)
    pub installment: Money,
    /// Installment times tenure
    pub total_payment: Money,
    /// Total payment minus principal
    pub total_interest: Money,
    /// One entry per month, in order
    pub entries: Vec<ScheduleEntry>,
}

/// Compute a repayment schedule with the standard reducing-balance method
///
/// Rejects non-positive principal or rate and a zero tenure with
/// [`LoanError::InvalidScheduleParameters`] instead of producing a garbage
/// schedule; a zero rate in particular would otherwise divide by zero.
pub fn compute_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> LoanResult<RepaymentSchedule> {
    if !principal.is_positive() {
        return Err(invalid("principal must be positive"));
    }
    if annual_rate_percent <= Decimal::ZERO {
        return Err(invalid("annual interest rate must be positive"));
    }
    if tenure_months == 0 {
        return Err(invalid("tenure must be at least one month"));
    }

    let monthly_rate = annual_rate_percent / dec!(1200);
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(tenure_months))
        .ok_or_else(|| invalid("rate and tenure overflow the installment formula"))?;

    let principal_exact = principal.to_decimal();
    let installment_exact = principal_exact
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(growth - Decimal::ONE))
        .ok_or_else(|| invalid("installment formula overflowed"))?;
    let installment = to_money(installment_exact)?;

    let mut entries = Vec::with_capacity(tenure_months as usize);
    let mut balance = principal_exact;
    let mut principal_paid = Money::zero();

    for month in 1..=tenure_months {
        let interest_exact = balance * monthly_rate;
        balance -= installment_exact - interest_exact;

        let (principal_component, remaining_balance) = if month == tenure_months {
            // Fold the rounding residue into the final principal split so the
            // schedule pays down to exactly zero.
            (principal - principal_paid, Money::zero())
        } else {
            let cumulative = to_money(principal_exact - balance)?;
            (cumulative - principal_paid, principal - cumulative)
        };
        principal_paid += principal_component;

        entries.push(ScheduleEntry {
            month,
            principal_component,
            interest_component: to_money(interest_exact)?,
            installment,
            remaining_balance,
        });
    }

    let total_payment = installment
        .checked_mul(i64::from(tenure_months))
        .ok_or_else(|| invalid("total payment exceeds the representable range"))?;
    let total_interest = total_payment - principal;

    Ok(RepaymentSchedule {
        installment,
        total_payment,
        total_interest,
        entries,
    })
}

fn invalid(reason: &str) -> LoanError {
    LoanError::InvalidScheduleParameters(reason.to_string())
}

fn to_money(value: Decimal) -> LoanResult<Money> {
    Money::try_from_decimal(value)
        .ok_or_else(|| invalid("amount exceeds the representable range"))
}
