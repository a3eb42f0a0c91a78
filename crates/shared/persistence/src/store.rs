//! Document store contract.
//!
//! A store exposes by-id CRUD primitives over one collection of raw
//! records. Every primitive reports a missing record as `Ok(None)`, which
//! keeps "not found" distinguishable from transport failures.

use std::sync::Arc;

use async_trait::async_trait;
use common::AppResult;
use domain::Attributes;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Field carrying the store identifier in raw records
pub const STORE_ID_FIELD: &str = "_id";

/// Store-internal version marker, never exposed to entities
pub const VERSION_KEY: &str = "__v";

/// Field carrying the identifier once metadata is stripped
pub const ENTITY_ID_FIELD: &str = "id";

/// Raw CRUD primitives keyed by identifier.
///
/// Records returned by a store carry its metadata (`_id` as a string and
/// `__v`); callers strip it with [`strip_metadata`] before mapping.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the raw record for `id`
    async fn fetch_by_id(&self, id: &str) -> AppResult<Option<Attributes>>;

    /// Insert a new record and return the identifier the store assigned
    async fn insert(&self, fields: Attributes) -> AppResult<String>;

    /// Overwrite the fields of the record matching `id`, running field
    /// validation, and return the post-update record.
    ///
    /// Never creates a record: a missing id yields `Ok(None)` and writes
    /// nothing.
    async fn replace_by_id(&self, id: &str, fields: Attributes) -> AppResult<Option<Attributes>>;

    /// Remove the record matching `id`, returning it if it existed
    async fn delete_by_id(&self, id: &str) -> AppResult<Option<Attributes>>;
}

#[async_trait]
impl<T> DocumentStore for Arc<T>
where
    T: DocumentStore + ?Sized,
{
    async fn fetch_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        (**self).fetch_by_id(id).await
    }

    async fn insert(&self, fields: Attributes) -> AppResult<String> {
        (**self).insert(fields).await
    }

    async fn replace_by_id(&self, id: &str, fields: Attributes) -> AppResult<Option<Attributes>> {
        (**self).replace_by_id(id, fields).await
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        (**self).delete_by_id(id).await
    }
}

/// Drop store-internal metadata from a raw record.
///
/// The version key is removed and the store identifier is renamed to
/// [`ENTITY_ID_FIELD`].
pub fn strip_metadata(mut raw: Attributes) -> Attributes {
    raw.remove(VERSION_KEY);
    if let Some(id) = raw.remove(STORE_ID_FIELD) {
        raw.insert(ENTITY_ID_FIELD.to_string(), id);
    }
    raw
}
