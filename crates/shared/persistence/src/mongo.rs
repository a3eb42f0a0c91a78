//! MongoDB-backed document store.

use async_trait::async_trait;
use common::{AppError, AppResult};
use domain::Attributes;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde_json::Value;

use crate::schema::FieldValidator;
use crate::store::{DocumentStore, STORE_ID_FIELD, VERSION_KEY};

/// Server error code for a write rejected by the collection validator
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

/// One MongoDB collection exposed through [`DocumentStore`].
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
    validator: Option<FieldValidator>,
}

impl MongoStore {
    /// Wrap a collection handle
    pub fn new(collection: Collection<Document>) -> Self {
        Self {
            collection,
            validator: None,
        }
    }

    /// Run `validator` client-side before every insert and replace.
    ///
    /// Server-side collection validators still apply on top of it.
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Collection name
    pub fn name(&self) -> &str {
        self.collection.name()
    }

    fn validate(&self, fields: &Attributes) -> AppResult<()> {
        match &self.validator {
            Some(validate) => validate(fields),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn fetch_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        let oid = ObjectId::parse_str(id)?;
        let found = self.collection.find_one(doc! { "_id": oid }).await?;

        Ok(found.map(to_attributes))
    }

    async fn insert(&self, fields: Attributes) -> AppResult<String> {
        self.validate(&fields)?;

        let mut document = to_document(fields)?;
        document.insert(VERSION_KEY, 0_i32);

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_write_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| AppError::internal("insert returned a non-ObjectId identifier"))?;

        tracing::debug!(collection = %self.name(), id = %id, "Document inserted");
        Ok(id)
    }

    async fn replace_by_id(&self, id: &str, fields: Attributes) -> AppResult<Option<Attributes>> {
        let oid = ObjectId::parse_str(id)?;

        if let Err(e) = self.validate(&fields) {
            // a missing record reports absence even when the new values are invalid
            return match self.fetch_by_id(id).await? {
                Some(_) => Err(e),
                None => Ok(None),
            };
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": to_document(fields)? })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)?;

        if updated.is_some() {
            tracing::debug!(collection = %self.name(), id = %id, "Document replaced");
        }

        Ok(updated.map(to_attributes))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<Option<Attributes>> {
        let oid = ObjectId::parse_str(id)?;
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await?;

        if deleted.is_some() {
            tracing::debug!(collection = %self.name(), id = %id, "Document deleted");
        }

        Ok(deleted.map(to_attributes))
    }
}

/// Encode attributes for the driver, leaving store metadata to the store
fn to_document(mut fields: Attributes) -> AppResult<Document> {
    fields.remove(STORE_ID_FIELD);
    fields.remove(VERSION_KEY);
    Ok(mongodb::bson::to_document(&fields)?)
}

/// Decode a driver document, surfacing the ObjectId as its hex string
fn to_attributes(mut document: Document) -> Attributes {
    if let Ok(oid) = document.get_object_id(STORE_ID_FIELD) {
        document.insert(STORE_ID_FIELD, oid.to_hex());
    }

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// Surface collection validator rejections as validation failures
fn map_write_error(err: mongodb::error::Error) -> AppError {
    let rejected = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DOCUMENT_VALIDATION_FAILURE => {
            Some(e.message.clone())
        }
        ErrorKind::Command(e) if e.code == DOCUMENT_VALIDATION_FAILURE => Some(e.message.clone()),
        _ => None,
    };

    match rejected {
        Some(message) => AppError::validation(message),
        None => AppError::Database(err),
    }
}
