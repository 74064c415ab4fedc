//! User model
//!
//! Borrowers and administrators. National id and tax id are stored as opaque
//! serialized ciphertext; the password is stored as an Argon2 PHC hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A borrower
    #[default]
    User,
    /// An administrator
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Whether the account may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    /// Parse a status from its stored/CLI string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Full name
    pub name: String,

    /// Contact phone number; unique together with email
    pub phone: String,

    /// Email address; unique together with phone
    pub email: String,

    /// National identity number, encrypted (iv:tag:ciphertext)
    pub national_id_encrypted: String,

    /// Tax identity number, encrypted (iv:tag:ciphertext)
    pub tax_id_encrypted: String,

    /// Stated occupation
    #[serde(default)]
    pub occupation: String,

    /// Employer or organization
    #[serde(default)]
    pub organization: String,

    /// Argon2 PHC-format password hash
    pub password_hash: String,

    /// Account role
    #[serde(default)]
    pub role: UserRole,

    /// Sign-in status
    #[serde(default)]
    pub status: UserStatus,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active account
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        national_id_encrypted: String,
        tax_id_encrypted: String,
        password_hash: String,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            national_id_encrypted,
            tax_id_encrypted,
            occupation: String::new(),
            organization: String::new(),
            password_hash,
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account may sign in
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Block or unblock the account
    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
