//! Loan application display formatting

use crate::services::{ApplicationDetail, ApplicationOverview, ApplicationSummary};

/// Format a borrower's applications as a table
pub fn format_application_list(summaries: &[ApplicationSummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No applications found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<40}  {:<24}  {:>14}  {:<22}  {}\n",
        "ID", "Product", "Amount", "Status", "Note"
    ));
    output.push_str(&format!(
        "{:-<40}  {:-<24}  {:->14}  {:-<22}  {:-<4}\n",
        "", "", "", "", ""
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<40}  {:<24}  {:>14}  {:<22}  {}\n",
            summary.application.id.to_string(),
            summary.loan_name,
            format!("{}{}", currency, summary.application.amount_required),
            summary.application.status.to_string(),
            summary.application.note.as_deref().unwrap_or(""),
        ));
    }

    output
}

/// Format the admin review queue as a table
pub fn format_application_overview(rows: &[ApplicationOverview], currency: &str) -> String {
    if rows.is_empty() {
        return "No applications found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<40}  {:<20}  {:<24}  {:>14}  {}\n",
        "ID", "Borrower", "Product", "Amount", "Status"
    ));
    output.push_str(&format!(
        "{:-<40}  {:-<20}  {:-<24}  {:->14}  {:-<22}\n",
        "", "", "", "", ""
    ));

    for row in rows {
        output.push_str(&format!(
            "{:<40}  {:<20}  {:<24}  {:>14}  {}\n",
            row.application.id.to_string(),
            row.borrower_name,
            row.loan_name,
            format!("{}{}", currency, row.application.amount_required),
            row.application.status,
        ));
    }

    output
}

/// Format the full admin view of one application
pub fn format_application_detail(detail: &ApplicationDetail, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Application:     {}\n", detail.application.id));
    output.push_str(&format!("Product:         {}\n", detail.loan_name));
    output.push_str(&format!(
        "Amount:          {}{}\n",
        currency, detail.application.amount_required
    ));
    output.push_str(&format!("Status:          {}\n", detail.application.status));
    if let Some(note) = &detail.application.note {
        output.push_str(&format!("Note:            {}\n", note));
    }
    output.push('\n');
    output.push_str(&format!("Borrower:        {}\n", detail.borrower_name));
    output.push_str(&format!("Email:           {}\n", detail.borrower_email));
    output.push_str(&format!("Phone:           {}\n", detail.borrower_phone));
    output.push_str(&format!("National id:     {}\n", detail.borrower_national_id));
    output.push_str(&format!("Tax id:          {}\n", detail.borrower_tax_id));
    output.push('\n');
    output.push_str(&format!("Account holder:  {}\n", detail.application.account_holder_name));
    output.push_str(&format!("Account number:  {}\n", detail.account_number));
    output.push_str(&format!("Routing code:    {}\n", detail.routing_code));
    output
}
