//! Loan application CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::crypto::FieldCipher;
use crate::display::{
    format_application_detail, format_application_list, format_application_overview,
    format_schedule,
};
use crate::error::{LoanError, LoanResult};
use crate::models::{ApplicationId, ApplicationStatus, Money};
use crate::services::{
    ApplicationRequest, ApplicationService, LoanService, ScheduleService, UserService,
};
use crate::storage::Storage;

/// Loan application subcommands
#[derive(Subcommand)]
pub enum ApplicationCommands {
    /// Submit an application for a borrower
    Apply {
        /// Borrower's email, phone, or user ID
        borrower: String,
        /// Product name or ID
        #[arg(short, long)]
        loan: String,
        /// Amount required (e.g., "100000")
        #[arg(short, long)]
        amount: String,
        /// Name on the disbursement account
        #[arg(long)]
        holder: String,
        /// Disbursement account number
        #[arg(long)]
        account: String,
        /// Bank routing/branch code
        #[arg(long)]
        routing: String,
    },
    /// List applications
    List {
        /// Limit to one borrower's applications
        #[arg(short, long)]
        borrower: Option<String>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by a substring of borrower name, email, or product name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the full detail of one application, decrypted
    Show {
        /// Application ID
        id: String,
    },
    /// Move an application to a new review state
    SetStatus {
        /// Application ID
        id: String,
        /// New status (pending, processing, accepted-not-disbursed,
        /// accepted-disbursed, rejected)
        status: String,
        /// Reviewer note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Show the repayment schedule for a disbursed application
    Schedule {
        /// Application ID
        id: String,
        /// Restrict access to this borrower (email, phone, or user ID)
        #[arg(short, long)]
        borrower: Option<String>,
    },
}

fn parse_application_id(s: &str) -> LoanResult<ApplicationId> {
    s.parse()
        .map_err(|_| LoanError::Validation(format!("Invalid application ID: '{}'", s)))
}

fn parse_status(s: &str) -> LoanResult<ApplicationStatus> {
    ApplicationStatus::parse(s).ok_or_else(|| {
        LoanError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: pending, processing, \
             accepted-not-disbursed, accepted-disbursed, rejected",
            s
        ))
    })
}

/// Handle a loan application command
pub fn handle_application_command(
    storage: &Storage,
    cipher: &FieldCipher,
    settings: &Settings,
    cmd: ApplicationCommands,
) -> LoanResult<()> {
    let service = ApplicationService::new(storage, cipher);
    let users = UserService::new(storage, cipher);
    let currency = &settings.currency_symbol;

    match cmd {
        ApplicationCommands::Apply {
            borrower,
            loan,
            amount,
            holder,
            account,
            routing,
        } => {
            let user = users
                .find(&borrower)?
                .ok_or_else(|| LoanError::user_not_found(&borrower))?;
            let product = LoanService::new(storage)
                .find(&loan)?
                .ok_or_else(|| LoanError::loan_not_found(&loan))?;
            let amount = Money::parse(&amount)
                .map_err(|e| LoanError::Validation(e.to_string()))?;

            let application = service.submit(ApplicationRequest {
                user_id: user.id,
                loan_id: product.id,
                amount_required: amount,
                account_holder_name: holder,
                account_number: account,
                routing_code: routing,
            })?;

            println!("Application submitted: {}", application.id);
            println!("  Product: {}", product.name);
            println!("  Amount:  {}{}", currency, application.amount_required);
            println!("  Status:  {}", application.status);
        }

        ApplicationCommands::List {
            borrower,
            status,
            search,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;

            match borrower {
                Some(identifier) => {
                    let user = users
                        .find(&identifier)?
                        .ok_or_else(|| LoanError::user_not_found(&identifier))?;
                    let mut summaries = service.list_for_user(user.id)?;
                    if let Some(wanted) = status {
                        summaries.retain(|s| s.application.status == wanted);
                    }
                    print!("{}", format_application_list(&summaries, currency));
                }
                None => {
                    let rows = service.list(status, search.as_deref())?;
                    print!("{}", format_application_overview(&rows, currency));
                }
            }
        }

        ApplicationCommands::Show { id } => {
            let detail = service.detail(parse_application_id(&id)?)?;
            print!("{}", format_application_detail(&detail, currency));
        }

        ApplicationCommands::SetStatus { id, status, note } => {
            let application =
                service.set_status(parse_application_id(&id)?, parse_status(&status)?, note)?;
            println!("Application {} is now {}.", application.id, application.status);
        }

        ApplicationCommands::Schedule { id, borrower } => {
            let requester = match borrower {
                Some(identifier) => Some(
                    users
                        .find(&identifier)?
                        .ok_or_else(|| LoanError::user_not_found(&identifier))?
                        .id,
                ),
                None => None,
            };

            let schedule = ScheduleService::new(storage)
                .repayment_schedule(parse_application_id(&id)?, requester)?;
            print!("{}", format_schedule(&schedule, currency));
        }
    }

    Ok(())
}
