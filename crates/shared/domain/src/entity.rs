//! Persistable entity contract.
//!
//! An entity is identified by an opaque, store-assigned identifier and can
//! render itself into a plain attribute map. Repositories work exclusively
//! through this trait, so one repository implementation serves every type
//! that implements it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Structural representation of an entity, keyed by field name.
pub type Attributes = Map<String, Value>;

/// A domain object persisted through a repository.
pub trait Entity: Send + Sync + 'static {
    /// Entity kind used in diagnostics ("User", "Post", ...)
    const KIND: &'static str;

    /// Store-assigned identifier, `None` until the entity has been saved
    fn id(&self) -> Option<&str>;

    /// Return the entity carrying `id`.
    ///
    /// Identity is assigned by consuming the value and returning a new one,
    /// so callers always hold the identified entity rather than relying on
    /// in-place mutation.
    fn with_id(self, id: String) -> Self;

    /// Serialize into the attribute map written to the store.
    ///
    /// The identifier is never part of the map; the store owns it.
    fn to_object(&self) -> DomainResult<Attributes>;
}

/// Serialize any value into an attribute map.
///
/// Fails when the value does not serialize to a JSON object.
pub fn to_attributes<T: Serialize>(value: &T) -> DomainResult<Attributes> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::internal(format!(
            "expected an object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(DomainError::internal(e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
