//! Loan catalog CLI commands

use clap::Subcommand;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::display::{format_loan_details, format_loan_list};
use crate::error::{LoanError, LoanResult};
use crate::models::Money;
use crate::services::{LoanProductInput, LoanService};
use crate::storage::Storage;

/// Loan catalog subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Add a product to the catalog
    Add {
        /// Product name
        name: String,
        /// Annual interest rate as a percentage (e.g., "10.5")
        #[arg(short, long)]
        rate: String,
        /// Minimum amount (e.g., "10000")
        #[arg(long)]
        min: String,
        /// Maximum amount (e.g., "500000")
        #[arg(long)]
        max: String,
        /// Tenure in months
        #[arg(short, long)]
        tenure: u32,
        /// Product description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Processing fee as a percentage
        #[arg(long, default_value = "0")]
        fee: String,
        /// Required documents
        #[arg(long, default_value = "")]
        docs: String,
        /// Eligibility notes
        #[arg(long, default_value = "")]
        eligibility: String,
    },
    /// List the catalog
    List,
    /// Show one product's details
    Show {
        /// Product name or ID
        product: String,
    },
    /// Edit a product
    Edit {
        /// Product name or ID
        product: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New annual interest rate
        #[arg(short, long)]
        rate: Option<String>,
        /// New minimum amount
        #[arg(long)]
        min: Option<String>,
        /// New maximum amount
        #[arg(long)]
        max: Option<String>,
        /// New tenure in months
        #[arg(short, long)]
        tenure: Option<u32>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New processing fee
        #[arg(long)]
        fee: Option<String>,
        /// New required documents
        #[arg(long)]
        docs: Option<String>,
        /// New eligibility notes
        #[arg(long)]
        eligibility: Option<String>,
    },
    /// Remove a product from the catalog
    Remove {
        /// Product name or ID
        product: String,
    },
}

fn parse_rate(s: &str) -> LoanResult<Decimal> {
    s.parse()
        .map_err(|_| LoanError::Validation(format!("Invalid rate: '{}'", s)))
}

fn parse_amount(s: &str) -> LoanResult<Money> {
    Money::parse(s).map_err(|e| LoanError::Validation(e.to_string()))
}

/// Handle a loan catalog command
pub fn handle_loan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LoanCommands,
) -> LoanResult<()> {
    let service = LoanService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        LoanCommands::Add {
            name,
            rate,
            min,
            max,
            tenure,
            description,
            fee,
            docs,
            eligibility,
        } => {
            let product = service.create(LoanProductInput {
                name,
                description,
                annual_rate_percent: parse_rate(&rate)?,
                processing_fee_percent: parse_rate(&fee)?,
                min_amount: parse_amount(&min)?,
                max_amount: parse_amount(&max)?,
                tenure_months: tenure,
                required_docs: docs,
                eligibility_info: eligibility,
            })?;
            println!("Added loan product: {}", product.name);
            println!("  ID: {}", product.id);
        }

        LoanCommands::List => {
            let products = service.list()?;
            print!("{}", format_loan_list(&products, currency));
        }

        LoanCommands::Show { product } => {
            let found = service
                .find(&product)?
                .ok_or_else(|| LoanError::loan_not_found(&product))?;
            print!("{}", format_loan_details(&found, currency));
        }

        LoanCommands::Edit {
            product,
            name,
            rate,
            min,
            max,
            tenure,
            description,
            fee,
            docs,
            eligibility,
        } => {
            let existing = service
                .find(&product)?
                .ok_or_else(|| LoanError::loan_not_found(&product))?;

            let input = LoanProductInput {
                name: name.unwrap_or_else(|| existing.name.clone()),
                description: description.unwrap_or_else(|| existing.description.clone()),
                annual_rate_percent: match rate {
                    Some(r) => parse_rate(&r)?,
                    None => existing.annual_rate_percent,
                },
                processing_fee_percent: match fee {
                    Some(f) => parse_rate(&f)?,
                    None => existing.processing_fee_percent,
                },
                min_amount: match min {
                    Some(m) => parse_amount(&m)?,
                    None => existing.min_amount,
                },
                max_amount: match max {
                    Some(m) => parse_amount(&m)?,
                    None => existing.max_amount,
                },
                tenure_months: tenure.unwrap_or(existing.tenure_months),
                required_docs: docs.unwrap_or_else(|| existing.required_docs.clone()),
                eligibility_info: eligibility.unwrap_or_else(|| existing.eligibility_info.clone()),
            };

            let updated = service.update(existing.id, input)?;
            println!("Updated loan product: {}", updated.name);
        }

        LoanCommands::Remove { product } => {
            let found = service
                .find(&product)?
                .ok_or_else(|| LoanError::loan_not_found(&product))?;
            service.delete(found.id)?;
            println!("Removed loan product: {}", found.name);
        }
    }

    Ok(())
}
