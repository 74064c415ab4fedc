//! Repayment schedule display formatting

use crate::schedule::RepaymentSchedule;

/// Format a repayment schedule as a table with summary lines
pub fn format_schedule(schedule: &RepaymentSchedule, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Monthly installment: {}{}\n",
        currency, schedule.installment
    ));
    output.push_str(&format!(
        "Total payment:       {}{}\n",
        currency, schedule.total_payment
    ));
    output.push_str(&format!(
        "Total interest:      {}{}\n\n",
        currency, schedule.total_interest
    ));

    output.push_str(&format!(
        "{:>5}  {:>14}  {:>14}  {:>14}  {:>14}\n",
        "Month", "Principal", "Interest", "Installment", "Balance"
    ));
    output.push_str(&format!(
        "{:->5}  {:->14}  {:->14}  {:->14}  {:->14}\n",
        "", "", "", "", ""
    ));

    for entry in &schedule.entries {
        output.push_str(&format!(
            "{:>5}  {:>14}  {:>14}  {:>14}  {:>14}\n",
            entry.month,
            entry.principal_component.to_string(),
            entry.interest_component.to_string(),
            entry.installment.to_string(),
            entry.remaining_balance.to_string(),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::schedule::compute_schedule;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_schedule() {
        let schedule = compute_schedule(Money::from_units(100_000), dec!(10), 12).unwrap();
        let output = format_schedule(&schedule, "₹");

        assert!(output.contains("Monthly installment: ₹8791.59"));
        assert!(output.contains("Total payment:       ₹105499.08"));
        assert!(output.contains("Total interest:      ₹5499.08"));
        // One line per month plus the summary and header lines
        assert_eq!(output.lines().count(), 4 + 2 + 12);
        assert!(output.lines().last().unwrap().trim_start().starts_with("12"));
    }
}
