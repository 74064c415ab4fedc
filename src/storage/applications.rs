//! Loan application repository for JSON storage
//!
//! Manages loading and saving applications to applications.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LoanError;
use crate::models::{ApplicationId, ApplicationStatus, LoanApplication, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ApplicationData {
    applications: Vec<LoanApplication>,
}

/// Repository for loan application persistence
pub struct ApplicationRepository {
    path: PathBuf,
    data: RwLock<HashMap<ApplicationId, LoanApplication>>,
}

impl ApplicationRepository {
    /// Create a new application repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load applications from disk
    pub fn load(&self) -> Result<(), LoanError> {
        let file_data: ApplicationData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for application in file_data.applications {
            data.insert(application.id, application);
        }

        Ok(())
    }

    /// Save applications to disk
    pub fn save(&self) -> Result<(), LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ApplicationData {
            applications: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an application by ID
    pub fn get(&self, id: ApplicationId) -> Result<Option<LoanApplication>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all applications, newest first
    pub fn get_all(&self) -> Result<Vec<LoanApplication>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut applications: Vec<_> = data.values().cloned().collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    /// Get one borrower's applications, newest first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<LoanApplication>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut applications: Vec<_> = data
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    /// Count applications in the given status
    pub fn count_by_status(&self, status: ApplicationStatus) -> Result<usize, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().filter(|a| a.status == status).count())
    }

    /// Insert or update an application
    pub fn upsert(&self, application: LoanApplication) -> Result<(), LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(application.id, application);
        Ok(())
    }

    /// Delete all applications belonging to a user, returning how many
    pub fn delete_by_user(&self, user_id: UserId) -> Result<usize, LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|_, a| a.user_id != user_id);
        Ok(before - data.len())
    }

    /// Count all applications
    pub fn count(&self) -> Result<usize, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
