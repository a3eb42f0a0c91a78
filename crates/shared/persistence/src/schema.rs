//! Field-level validation run by stores on every write.
//!
//! A collection declares its constraints on a schema struct with the
//! `validator` derive; [`schema_validator`] turns that struct into a
//! [`FieldValidator`] a store can run against raw attributes before
//! persisting them.

use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{Attributes, DomainError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// Validation hook applied to the attributes of an insert or replace.
pub type FieldValidator = Arc<dyn Fn(&Attributes) -> AppResult<()> + Send + Sync>;

/// Build a validator from a schema type.
///
/// Attributes that cannot be read as `T` (missing or mistyped fields) fail
/// the same way as a violated constraint.
pub fn schema_validator<T>() -> FieldValidator
where
    T: DeserializeOwned + Validate + 'static,
{
    Arc::new(|fields: &Attributes| {
        let schema: T = serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| AppError::validation(e.to_string()))?;

        schema
            .validate()
            .map_err(|e| AppError::from(DomainError::from(e)))
    })
}
