//! User repository for JSON storage
//!
//! Manages loading and saving accounts to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LoanError;
use crate::models::{User, UserId, UserRole};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), LoanError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = UserData {
            users: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find a user whose email or phone matches the identifier
    pub fn get_by_email_or_phone(&self, identifier: &str) -> Result<Option<User>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let lowered = identifier.to_lowercase();
        Ok(data
            .values()
            .find(|u| u.email.to_lowercase() == lowered || u.phone == identifier)
            .cloned())
    }

    /// Check whether another account already uses this email or phone
    pub fn contact_exists(
        &self,
        email: &str,
        phone: &str,
        exclude_id: Option<UserId>,
    ) -> Result<bool, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let email_lower = email.to_lowercase();
        Ok(data.values().any(|u| {
            (u.email.to_lowercase() == email_lower || u.phone == phone) && Some(u.id) != exclude_id
        }))
    }

    /// Get all users with the given role, sorted by name
    pub fn get_by_role(&self, role: UserRole) -> Result<Vec<User>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().filter(|u| u.role == role).cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Delete a user, returning whether it existed
    pub fn delete(&self, id: UserId) -> Result<bool, LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count users with the given role
    pub fn count_by_role(&self, role: UserRole) -> Result<usize, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().filter(|u| u.role == role).count())
    }
}
