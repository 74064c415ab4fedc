//! User service
//!
//! Registration, credential verification, profile reads with PII decryption,
//! and administrative account management.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;

use crate::crypto::FieldCipher;
use crate::error::{LoanError, LoanResult};
use crate::models::{User, UserId, UserRole, UserStatus};
use crate::storage::Storage;

/// Input for registering an account
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub national_id: String,
    pub tax_id: String,
    pub occupation: String,
    pub organization: String,
    pub password: String,
}

/// A user's profile with sensitive fields decrypted
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub national_id: String,
    pub tax_id: String,
    pub occupation: String,
    pub organization: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// Profile fields that may be updated; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub organization: Option<String>,
}

/// Service for account management
pub struct UserService<'a> {
    storage: &'a Storage,
    cipher: &'a FieldCipher,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage, cipher: &'a FieldCipher) -> Self {
        Self { storage, cipher }
    }

    /// Register an account with the given role
    pub fn register(&self, registration: Registration, role: UserRole) -> LoanResult<User> {
        let Registration {
            name,
            phone,
            email,
            national_id,
            tax_id,
            occupation,
            organization,
            password,
        } = registration;

        let name = name.trim().to_string();
        let email = email.trim().to_lowercase();
        let phone = phone.trim().to_string();

        for (field, value) in [
            ("name", name.as_str()),
            ("phone", phone.as_str()),
            ("email", email.as_str()),
            ("national id", national_id.as_str()),
            ("tax id", tax_id.as_str()),
            ("password", password.as_str()),
        ] {
            if value.is_empty() {
                return Err(LoanError::Validation(format!("{} is required", field)));
            }
        }
        if !email.contains('@') {
            return Err(LoanError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        if self.storage.users.contact_exists(&email, &phone, None)? {
            return Err(LoanError::Duplicate {
                entity_type: "User",
                identifier: email,
            });
        }

        let password_hash = hash_password(&password)?;
        let national_id_encrypted = self.cipher.encrypt(&national_id)?;
        let tax_id_encrypted = self.cipher.encrypt(&tax_id)?;

        let mut user = User::new(
            name,
            phone,
            email,
            national_id_encrypted,
            tax_id_encrypted,
            password_hash,
            role,
        );
        user.occupation = occupation.trim().to_string();
        user.organization = organization.trim().to_string();

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        info!(user = %user.id, %role, "registered account");
        Ok(user)
    }

    /// Verify credentials for an account with the given role
    ///
    /// The same error is returned for an unknown identifier, a wrong
    /// password, and a role mismatch, so callers cannot probe which
    /// accounts exist.
    pub fn authenticate(&self, identifier: &str, password: &str, role: UserRole) -> LoanResult<User> {
        let user = self
            .storage
            .users
            .get_by_email_or_phone(identifier)?
            .filter(|u| u.role == role)
            .ok_or_else(|| LoanError::Authentication("invalid credentials".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(LoanError::Authentication("invalid credentials".into()));
        }
        if !user.is_active() {
            return Err(LoanError::Authentication("account is blocked".into()));
        }

        Ok(user)
    }

    /// Get a user's profile with PII decrypted
    ///
    /// A decryption failure propagates as an error; it is never reported as
    /// if the field had no value.
    pub fn profile(&self, id: UserId) -> LoanResult<Profile> {
        let user = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| LoanError::user_not_found(id.to_string()))?;

        let national_id = self.cipher.decrypt(&user.national_id_encrypted)?;
        let tax_id = self.cipher.decrypt(&user.tax_id_encrypted)?;

        Ok(Profile {
            id: user.id,
            name: user.name,
            phone: user.phone,
            email: user.email,
            national_id,
            tax_id,
            occupation: user.occupation,
            organization: user.organization,
            role: user.role,
            status: user.status,
        })
    }

    /// Update contact and employment fields
    pub fn update_profile(&self, id: UserId, update: ProfileUpdate) -> LoanResult<User> {
        let mut user = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| LoanError::user_not_found(id.to_string()))?;

        let email = update
            .email
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_else(|| user.email.clone());
        let phone = update
            .phone
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| user.phone.clone());

        if email.is_empty() || !email.contains('@') {
            return Err(LoanError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        if phone.is_empty() {
            return Err(LoanError::Validation("phone is required".into()));
        }
        if self.storage.users.contact_exists(&email, &phone, Some(id))? {
            return Err(LoanError::Duplicate {
                entity_type: "User",
                identifier: email,
            });
        }

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(LoanError::Validation("name is required".into()));
            }
            user.name = name;
        }
        user.email = email;
        user.phone = phone;
        if let Some(occupation) = update.occupation {
            user.occupation = occupation.trim().to_string();
        }
        if let Some(organization) = update.organization {
            user.organization = organization.trim().to_string();
        }
        user.updated_at = chrono::Utc::now();

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        Ok(user)
    }

    /// Change a user's password after verifying the old one
    pub fn change_password(&self, id: UserId, old_password: &str, new_password: &str) -> LoanResult<()> {
        let mut user = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| LoanError::user_not_found(id.to_string()))?;

        if !verify_password(old_password, &user.password_hash)? {
            return Err(LoanError::Authentication("incorrect old password".into()));
        }
        if new_password.is_empty() {
            return Err(LoanError::Validation("new password is required".into()));
        }

        user.password_hash = hash_password(new_password)?;
        user.updated_at = chrono::Utc::now();

        self.storage.users.upsert(user)?;
        self.storage.users.save()?;

        Ok(())
    }

    /// Block or unblock an account
    pub fn set_status(&self, id: UserId, status: UserStatus) -> LoanResult<User> {
        let mut user = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| LoanError::user_not_found(id.to_string()))?;

        user.set_status(status);

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        info!(user = %user.id, %status, "updated account status");
        Ok(user)
    }

    /// List users with the given role, optionally filtered by a substring
    /// of name, email, or phone
    pub fn list(&self, role: UserRole, search: Option<&str>) -> LoanResult<Vec<User>> {
        let users = self.storage.users.get_by_role(role)?;
        match search {
            Some(query) => {
                let query = query.to_lowercase();
                Ok(users
                    .into_iter()
                    .filter(|u| {
                        u.name.to_lowercase().contains(&query)
                            || u.email.to_lowercase().contains(&query)
                            || u.phone.contains(&query)
                    })
                    .collect())
            }
            None => Ok(users),
        }
    }

    /// Find a user by id, email, or phone
    pub fn find(&self, identifier: &str) -> LoanResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_email_or_phone(identifier)? {
            return Ok(Some(user));
        }
        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }
        Ok(None)
    }

    /// Delete an account and everything it owns: applications, tickets,
    /// and replies
    pub fn delete(&self, id: UserId) -> LoanResult<()> {
        if self.storage.users.get(id)?.is_none() {
            return Err(LoanError::user_not_found(id.to_string()));
        }

        let applications = self.storage.applications.delete_by_user(id)?;
        let tickets = self.storage.tickets.delete_by_user(id)?;
        self.storage.users.delete(id)?;

        self.storage.applications.save()?;
        self.storage.tickets.save()?;
        self.storage.users.save()?;

        info!(user = %id, applications, tickets, "deleted account and owned records");
        Ok(())
    }
}

fn hash_password(password: &str) -> LoanResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LoanError::Encryption(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, stored_hash: &str) -> LoanResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| LoanError::Encryption(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
