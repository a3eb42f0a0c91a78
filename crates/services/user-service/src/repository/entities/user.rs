//! User document as stored in the users collection.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use domain::{User, UserRole};

/// User record read back from the store, metadata already stripped.
///
/// Unknown stored roles fail to decode instead of being coerced.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDocument {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert stored document to domain entity
impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User {
            id: Some(document.id),
            email: document.email,
            name: document.name,
            role: document.role,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}
