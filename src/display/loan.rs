//! Loan product display formatting

use crate::models::LoanProduct;

/// Format the catalog as a table
pub fn format_loan_list(products: &[LoanProduct], currency: &str) -> String {
    if products.is_empty() {
        return "No loan products found.".to_string();
    }

    let name_width = products
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>8}  {:>7}  {:>14}  {:>14}\n",
        "Name",
        "Rate %",
        "Months",
        "Min",
        "Max",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->8}  {:->7}  {:->14}  {:->14}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for product in products {
        output.push_str(&format!(
            "{:<name_width$}  {:>8}  {:>7}  {:>14}  {:>14}\n",
            product.name,
            product.annual_rate_percent.to_string(),
            product.tenure_months,
            format!("{}{}", currency, product.min_amount),
            format!("{}{}", currency, product.max_amount),
            name_width = name_width,
        ));
    }

    output
}

/// Format one product's full details
pub fn format_loan_details(product: &LoanProduct, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Name:            {}\n", product.name));
    output.push_str(&format!("ID:              {}\n", product.id));
    output.push_str(&format!("Annual rate:     {}%\n", product.annual_rate_percent));
    output.push_str(&format!(
        "Processing fee:  {}%\n",
        product.processing_fee_percent
    ));
    output.push_str(&format!(
        "Amount band:     {}{} - {}{}\n",
        currency, product.min_amount, currency, product.max_amount
    ));
    output.push_str(&format!("Tenure:          {} months\n", product.tenure_months));
    if !product.description.is_empty() {
        output.push_str(&format!("Description:     {}\n", product.description));
    }
    if !product.required_docs.is_empty() {
        output.push_str(&format!("Required docs:   {}\n", product.required_docs));
    }
    if !product.eligibility_info.is_empty() {
        output.push_str(&format!("Eligibility:     {}\n", product.eligibility_info));
    }
    output
}
