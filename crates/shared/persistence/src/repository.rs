//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! Read, write and delete operations are separate traits composed into
//! [`CrudRepository`]. [`BaseRepository`] is the one implementation: it is
//! generic over the entity, the stored document shape, the store and the
//! document -> entity factory, so per-entity repositories are just type
//! aliases with a factory function.

use std::marker::PhantomData;

use async_trait::async_trait;
use common::{AppError, AppResult};
use domain::{Attributes, Entity};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::{strip_metadata, DocumentStore};

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E: Entity>: Send + Sync {
    /// Find entity by id.
    ///
    /// Absence is a normal outcome and yields `Ok(None)`.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<E>>;
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<E: Entity>: Send + Sync {
    /// Insert a new entity and return it carrying the store-assigned id.
    ///
    /// The argument is consumed; use the returned value.
    async fn save(&self, entity: E) -> AppResult<E>;

    /// Overwrite the record `id` with the entity's field values.
    ///
    /// Fails with `AppError::NotFound` when no record exists for `id`.
    async fn update(&self, id: &str, entity: E) -> AppResult<E>;
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<E: Entity>: Send + Sync {
    /// Delete entity by id.
    ///
    /// Fails with `AppError::NotFound` when no record exists for `id`.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

/// Full CRUD repository - Combines all operations
pub trait CrudRepository<E: Entity>:
    ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E> CrudRepository<E> for T
where
    T: ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>,
    E: Entity,
{
}

/// Generic repository over one collection.
///
/// `D` is the document shape read back from the store once metadata is
/// stripped; `factory` maps it to the entity. The repository keeps no state
/// besides the store handle and the factory, so it is safe to share across
/// concurrent callers.
pub struct BaseRepository<E, D, S, F = fn(D) -> E> {
    store: S,
    factory: F,
    _marker: PhantomData<fn() -> (E, D)>,
}

impl<E, D, S, F> BaseRepository<E, D, S, F>
where
    E: Entity,
    D: DeserializeOwned,
    S: DocumentStore,
    F: Fn(D) -> E + Send + Sync,
{
    /// Create new repository instance
    pub fn new(store: S, factory: F) -> Self {
        Self {
            store,
            factory,
            _marker: PhantomData,
        }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn create_entity_from_document(&self, raw: Option<Attributes>) -> AppResult<Option<E>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let document: D = serde_json::from_value(Value::Object(strip_metadata(raw)))?;
        Ok(Some((self.factory)(document)))
    }
}

#[async_trait]
impl<E, D, S, F> ReadRepository<E> for BaseRepository<E, D, S, F>
where
    E: Entity,
    D: DeserializeOwned,
    S: DocumentStore,
    F: Fn(D) -> E + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> AppResult<Option<E>> {
        let raw = self.store.fetch_by_id(id).await?;
        tracing::debug!(entity = E::KIND, id = %id, found = raw.is_some(), "find_by_id");

        self.create_entity_from_document(raw)
    }
}

#[async_trait]
impl<E, D, S, F> WriteRepository<E> for BaseRepository<E, D, S, F>
where
    E: Entity,
    D: DeserializeOwned,
    S: DocumentStore,
    F: Fn(D) -> E + Send + Sync,
{
    async fn save(&self, entity: E) -> AppResult<E> {
        if let Some(id) = entity.id().filter(|id| !id.is_empty()) {
            return Err(AppError::AlreadyPersisted {
                entity: E::KIND,
                id: id.to_string(),
            });
        }

        let id = self.store.insert(entity.to_object()?).await?;
        tracing::debug!(entity = E::KIND, id = %id, "saved");

        Ok(entity.with_id(id))
    }

    async fn update(&self, id: &str, entity: E) -> AppResult<E> {
        let updated = self.store.replace_by_id(id, entity.to_object()?).await?;

        if updated.is_none() {
            return Err(AppError::not_found(E::KIND, id));
        }

        tracing::debug!(entity = E::KIND, id = %id, "updated");
        Ok(entity.with_id(id.to_string()))
    }
}

#[async_trait]
impl<E, D, S, F> DeleteRepository<E> for BaseRepository<E, D, S, F>
where
    E: Entity,
    D: DeserializeOwned,
    S: DocumentStore,
    F: Fn(D) -> E + Send + Sync,
{
    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        if self.store.delete_by_id(id).await?.is_none() {
            return Err(AppError::not_found(E::KIND, id));
        }

        tracing::debug!(entity = E::KIND, id = %id, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockDocumentStore;
    use domain::{to_attributes, DomainResult};
    use mockall::predicate::eq;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Tag {
        #[serde(skip)]
        id: Option<String>,
        label: String,
    }

    impl Entity for Tag {
        const KIND: &'static str = "Tag";

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn with_id(self, id: String) -> Self {
            Self { id: Some(id), ..self }
        }

        fn to_object(&self) -> DomainResult<Attributes> {
            to_attributes(self)
        }
    }

    #[derive(Deserialize)]
    struct TagDocument {
        id: String,
        label: String,
    }

    fn tag_from_document(document: TagDocument) -> Tag {
        Tag {
            id: Some(document.id),
            label: document.label,
        }
    }

    fn tag(label: &str) -> Tag {
        Tag {
            id: None,
            label: label.to_string(),
        }
    }

    fn raw(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    type TagRepository = BaseRepository<Tag, TagDocument, MockDocumentStore>;

    fn repository(store: MockDocumentStore) -> TagRepository {
        TagRepository::new(store, tag_from_document)
    }

    #[tokio::test]
    async fn test_find_strips_metadata_before_factory() {
        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_by_id()
            .with(eq("t1"))
            .returning(|_| Ok(Some(raw(json!({ "_id": "t1", "__v": 4, "label": "rust" })))));

        let found = repository(store).find_by_id("t1").await.unwrap();

        assert_eq!(
            found,
            Some(Tag {
                id: Some("t1".to_string()),
                label: "rust".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_find_absent_skips_factory() {
        let mut store = MockDocumentStore::new();
        store.expect_fetch_by_id().returning(|_| Ok(None));

        let repo = BaseRepository::<Tag, TagDocument, _, _>::new(store, |_: TagDocument| -> Tag {
            panic!("factory must not run for absent documents")
        });

        assert!(repo.find_by_id("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_propagates_transport_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_by_id()
            .returning(|_| Err(AppError::internal("connection reset")));

        let err = repository(store).find_by_id("t1").await.unwrap_err();

        assert!(matches!(err, AppError::Internal(ref m) if m == "connection reset"));
    }

    #[tokio::test]
    async fn test_find_mismatched_document_is_serialization_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_by_id()
            .returning(|_| Ok(Some(raw(json!({ "_id": "t1", "title": "wrong shape" })))));

        let err = repository(store).find_by_id("t1").await.unwrap_err();

        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_save_writes_attributes_without_id() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .withf(|fields| fields == &raw(json!({ "label": "rust" })))
            .times(1)
            .returning(|_| Ok("t9".to_string()));

        let saved = repository(store).save(tag("rust")).await.unwrap();

        assert_eq!(saved.id(), Some("t9"));
        assert_eq!(saved.label, "rust");
    }

    #[tokio::test]
    async fn test_save_identified_entity_never_writes() {
        let mut store = MockDocumentStore::new();
        store.expect_insert().never();

        let err = repository(store)
            .save(tag("rust").with_id("t1".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyPersisted { entity: "Tag", ref id } if id == "t1"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut store = MockDocumentStore::new();
        store.expect_replace_by_id().returning(|_, _| Ok(None));

        let err = repository(store).update("t1", tag("go")).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { entity: "Tag", ref id } if id == "t1"));
    }

    #[tokio::test]
    async fn test_update_returns_entity_with_target_id() {
        let mut store = MockDocumentStore::new();
        store
            .expect_replace_by_id()
            .with(eq("t1"), eq(raw(json!({ "label": "go" }))))
            .returning(|_, _| Ok(Some(raw(json!({ "_id": "t1", "__v": 0, "label": "go" })))));

        let updated = repository(store).update("t1", tag("go")).await.unwrap();

        assert_eq!(updated.id(), Some("t1"));
        assert_eq!(updated.label, "go");
    }

    #[tokio::test]
    async fn test_update_propagates_validation_failure() {
        let mut store = MockDocumentStore::new();
        store
            .expect_replace_by_id()
            .returning(|_, _| Err(AppError::validation("label too long")));

        let err = repository(store).update("t1", tag("x")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "label too long"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut store = MockDocumentStore::new();
        store.expect_delete_by_id().returning(|_| Ok(None));

        let err = repository(store).delete_by_id("t1").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut store = MockDocumentStore::new();
        store
            .expect_delete_by_id()
            .with(eq("t1"))
            .times(1)
            .returning(|_| Ok(Some(raw(json!({ "_id": "t1", "label": "rust" })))));

        assert!(repository(store).delete_by_id("t1").await.is_ok());
    }
}
