//! Storage layer for eLoan
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Serialized ciphertext fields pass through this layer verbatim
//! as opaque strings.

pub mod applications;
pub mod file_io;
pub mod loans;
pub mod tickets;
pub mod users;

pub use applications::ApplicationRepository;
pub use file_io::{read_json, write_json_atomic};
pub use loans::LoanRepository;
pub use tickets::TicketRepository;
pub use users::UserRepository;

use crate::config::paths::EloanPaths;
use crate::error::LoanError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: EloanPaths,
    pub users: UserRepository,
    pub loans: LoanRepository,
    pub applications: ApplicationRepository,
    pub tickets: TicketRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: EloanPaths) -> Result<Self, LoanError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            loans: LoanRepository::new(paths.loans_file()),
            applications: ApplicationRepository::new(paths.applications_file()),
            tickets: TicketRepository::new(paths.tickets_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &EloanPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), LoanError> {
        self.users.load()?;
        self.loans.load()?;
        self.applications.load()?;
        self.tickets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LoanError> {
        self.users.save()?;
        self.loans.save()?;
        self.applications.save()?;
        self.tickets.save()?;
        Ok(())
    }
}
