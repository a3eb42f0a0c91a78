//! In-process document store.
//!
//! Behaves like a MongoDB collection as seen through [`DocumentStore`]:
//! identifiers are generated `ObjectId` hex strings, anything else is
//! rejected by the id parser, inserts stamp a `__v` version key and writes
//! run the configured field validator.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::AppResult;
use domain::Attributes;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::schema::FieldValidator;
use crate::store::{DocumentStore, STORE_ID_FIELD, VERSION_KEY};

/// Collection held in memory, cheap to clone (clones share records).
#[derive(Clone)]
pub struct InMemoryStore {
    name: String,
    records: Arc<RwLock<HashMap<String, Attributes>>>,
    validator: Option<FieldValidator>,
}

impl InMemoryStore {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Arc::new(RwLock::new(HashMap::new())),
            validator: None,
        }
    }

    /// Run `validator` on every insert and replace
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check whether the collection holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn validate(&self, fields: &Attributes) -> AppResult<()> {
        match &self.validator {
            Some(validate) => validate(fields),
            None => Ok(()),
        }
    }
}

/// Parse the same way the driver does, so malformed ids fail identically
fn parse_id(id: &str) -> AppResult<String> {
    Ok(ObjectId::parse_str(id)?.to_hex())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        let key = parse_id(id)?;
        Ok(self.records.read().await.get(&key).cloned())
    }

    async fn insert(&self, mut fields: Attributes) -> AppResult<String> {
        fields.remove(STORE_ID_FIELD);
        fields.remove(VERSION_KEY);
        self.validate(&fields)?;

        let id = ObjectId::new().to_hex();
        fields.insert(STORE_ID_FIELD.to_string(), Value::from(id.clone()));
        fields.insert(VERSION_KEY.to_string(), Value::from(0));

        self.records.write().await.insert(id.clone(), fields);
        tracing::debug!(collection = %self.name, id = %id, "Document inserted");

        Ok(id)
    }

    async fn replace_by_id(&self, id: &str, mut fields: Attributes) -> AppResult<Option<Attributes>> {
        let key = parse_id(id)?;
        fields.remove(STORE_ID_FIELD);
        fields.remove(VERSION_KEY);

        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&key) else {
            return Ok(None);
        };

        self.validate(&fields)?;
        record.extend(fields);
        tracing::debug!(collection = %self.name, id = %key, "Document replaced");

        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        let key = parse_id(id)?;
        let removed = self.records.write().await.remove(&key);

        if removed.is_some() {
            tracing::debug!(collection = %self.name, id = %key, "Document deleted");
        }

        Ok(removed)
    }
}
