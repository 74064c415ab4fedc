//! Loan product repository for JSON storage
//!
//! Manages loading and saving the product catalog to loans.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LoanError;
use crate::models::{LoanId, LoanProduct};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct LoanData {
    loans: Vec<LoanProduct>,
}

/// Repository for loan product persistence
pub struct LoanRepository {
    path: PathBuf,
    data: RwLock<HashMap<LoanId, LoanProduct>>,
}

impl LoanRepository {
    /// Create a new loan repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load products from disk
    pub fn load(&self) -> Result<(), LoanError> {
        let file_data: LoanData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for loan in file_data.loans {
            data.insert(loan.id, loan);
        }

        Ok(())
    }

    /// Save products to disk
    pub fn save(&self) -> Result<(), LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = LoanData {
            loans: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a product by ID
    pub fn get(&self, id: LoanId) -> Result<Option<LoanProduct>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all products, sorted by name
    pub fn get_all(&self) -> Result<Vec<LoanProduct>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut loans: Vec<_> = data.values().cloned().collect();
        loans.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(loans)
    }

    /// Get a product by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<LoanProduct>, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|l| l.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Check if a product name is already taken
    pub fn name_exists(&self, name: &str, exclude_id: Option<LoanId>) -> Result<bool, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .any(|l| l.name.to_lowercase() == name_lower && Some(l.id) != exclude_id))
    }

    /// Insert or update a product
    pub fn upsert(&self, loan: LoanProduct) -> Result<(), LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(loan.id, loan);
        Ok(())
    }

    /// Delete a product, returning whether it existed
    pub fn delete(&self, id: LoanId) -> Result<bool, LoanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count products
    pub fn count(&self) -> Result<usize, LoanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LoanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
