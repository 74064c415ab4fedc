//! Account CLI commands
//!
//! Passwords are read interactively so they never land in shell history.

use clap::Subcommand;

use crate::crypto::FieldCipher;
use crate::error::{LoanError, LoanResult};
use crate::models::{User, UserRole, UserStatus};
use crate::services::{ProfileUpdate, Registration, UserService};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a borrower (or an admin with --admin)
    Register {
        /// Full name
        name: String,
        /// Phone number
        #[arg(short, long)]
        phone: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// National identity number
        #[arg(long)]
        national_id: String,
        /// Tax identity number
        #[arg(long)]
        tax_id: String,
        /// Occupation
        #[arg(long, default_value = "")]
        occupation: String,
        /// Employer or organization
        #[arg(long, default_value = "")]
        organization: String,
        /// Create an administrator account
        #[arg(long)]
        admin: bool,
    },
    /// Verify credentials
    Login {
        /// Email or phone
        identifier: String,
        /// Log in as an administrator
        #[arg(long)]
        admin: bool,
    },
    /// Show a profile with decrypted identity fields
    Profile {
        /// Email, phone, or user ID
        user: String,
    },
    /// Update contact and employment fields
    Update {
        /// Email, phone, or user ID
        user: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New phone
        #[arg(long)]
        phone: Option<String>,
        /// New occupation
        #[arg(long)]
        occupation: Option<String>,
        /// New organization
        #[arg(long)]
        organization: Option<String>,
    },
    /// Change a password
    ChangePassword {
        /// Email, phone, or user ID
        user: String,
    },
    /// Block an account
    Block {
        /// Email, phone, or user ID
        user: String,
    },
    /// Unblock an account
    Unblock {
        /// Email, phone, or user ID
        user: String,
    },
    /// List accounts
    List {
        /// List administrators instead of borrowers
        #[arg(long)]
        admins: bool,
        /// Filter by a substring of name, email, or phone
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Delete an account and everything it owns
    Remove {
        /// Email, phone, or user ID
        user: String,
    },
}

fn find_user(service: &UserService, identifier: &str) -> LoanResult<User> {
    service
        .find(identifier)?
        .ok_or_else(|| LoanError::user_not_found(identifier))
}

/// Handle an account command
pub fn handle_user_command(
    storage: &Storage,
    cipher: &FieldCipher,
    cmd: UserCommands,
) -> LoanResult<()> {
    let service = UserService::new(storage, cipher);

    match cmd {
        UserCommands::Register {
            name,
            phone,
            email,
            national_id,
            tax_id,
            occupation,
            organization,
            admin,
        } => {
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| LoanError::Io(format!("Failed to read password: {}", e)))?;

            let role = if admin { UserRole::Admin } else { UserRole::User };
            let user = service.register(
                Registration {
                    name,
                    phone,
                    email,
                    national_id,
                    tax_id,
                    occupation,
                    organization,
                    password,
                },
                role,
            )?;

            println!("Registered {}: {}", role, user);
            println!("  ID: {}", user.id);
        }

        UserCommands::Login { identifier, admin } => {
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| LoanError::Io(format!("Failed to read password: {}", e)))?;

            let role = if admin { UserRole::Admin } else { UserRole::User };
            let user = service.authenticate(&identifier, &password, role)?;
            println!("Welcome back, {}.", user.name);
        }

        UserCommands::Profile { user } => {
            let found = find_user(&service, &user)?;
            let profile = service.profile(found.id)?;

            println!("Name:          {}", profile.name);
            println!("Email:         {}", profile.email);
            println!("Phone:         {}", profile.phone);
            println!("National id:   {}", profile.national_id);
            println!("Tax id:        {}", profile.tax_id);
            println!("Occupation:    {}", profile.occupation);
            println!("Organization:  {}", profile.organization);
            println!("Role:          {}", profile.role);
            println!("Status:        {}", profile.status);
        }

        UserCommands::Update {
            user,
            name,
            email,
            phone,
            occupation,
            organization,
        } => {
            let found = find_user(&service, &user)?;
            let updated = service.update_profile(
                found.id,
                ProfileUpdate {
                    name,
                    email,
                    phone,
                    occupation,
                    organization,
                },
            )?;
            println!("Updated profile for {}", updated);
        }

        UserCommands::ChangePassword { user } => {
            let found = find_user(&service, &user)?;
            let old_password = rpassword::prompt_password("Old password: ")
                .map_err(|e| LoanError::Io(format!("Failed to read password: {}", e)))?;
            let new_password = rpassword::prompt_password("New password: ")
                .map_err(|e| LoanError::Io(format!("Failed to read password: {}", e)))?;

            service.change_password(found.id, &old_password, &new_password)?;
            println!("Password changed.");
        }

        UserCommands::Block { user } => {
            let found = find_user(&service, &user)?;
            service.set_status(found.id, UserStatus::Blocked)?;
            println!("Blocked {}", found);
        }

        UserCommands::Unblock { user } => {
            let found = find_user(&service, &user)?;
            service.set_status(found.id, UserStatus::Active)?;
            println!("Unblocked {}", found);
        }

        UserCommands::List { admins, search } => {
            let role = if admins { UserRole::Admin } else { UserRole::User };
            let users = service.list(role, search.as_deref())?;

            if users.is_empty() {
                println!("No accounts found.");
            } else {
                for user in users {
                    println!("{:<40}  {:<9}  {}", user.id.to_string(), user.status.to_string(), user);
                }
            }
        }

        UserCommands::Remove { user } => {
            let found = find_user(&service, &user)?;
            service.delete(found.id)?;
            println!("Deleted {} and all associated records.", found);
        }
    }

    Ok(())
}
