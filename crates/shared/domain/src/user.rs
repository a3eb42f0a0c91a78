//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::entity::{to_attributes, Attributes, Entity};
use crate::error::DomainResult;

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
///
/// The field rules below are the only user rules: the domain checks them on
/// construction and rename, and the users collection runs them on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Store-assigned identifier (None until saved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        custom(function = "validate_name"),
        length(max = 64, message = "Name must be at most 64 characters")
    )]
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet persisted user with default role
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let now = Utc::now();
        let user = Self {
            id: None,
            email: email.into(),
            name: name.into(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Update user's name, leaving the user untouched if the name is invalid
    pub fn rename(&mut self, name: String) -> DomainResult<()> {
        let previous = std::mem::replace(&mut self.name, name);

        if let Err(e) = self.validate() {
            self.name = previous;
            return Err(e.into());
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Update user's role
    pub fn update_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

/// Reject blank and whitespace-only names
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Name is required".into());
        return Err(error);
    }
    Ok(())
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(self, id: String) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_object(&self) -> DomainResult<Attributes> {
        let mut attributes = to_attributes(self)?;
        attributes.remove("id");
        Ok(attributes)
    }
}
