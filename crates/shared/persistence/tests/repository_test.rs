//! Generic repository tests against the in-memory store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_test::{assert_err, assert_ok};

use common::AppError;
use domain::{to_attributes, Attributes, DomainResult, Entity};
use persistence::{
    schema_validator, BaseRepository, CrudRepository, DeleteRepository, DocumentStore,
    InMemoryStore, ReadRepository, WriteRepository,
};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Note {
    #[serde(skip)]
    id: Option<String>,
    name: String,
}

impl Note {
    fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

impl Entity for Note {
    const KIND: &'static str = "Note";

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

#[derive(Debug, Deserialize)]
struct NoteDocument {
    id: String,
    name: String,
}

#[derive(Deserialize, Validate)]
struct NoteSchema {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
}

fn note_from_document(document: NoteDocument) -> Note {
    Note {
        id: Some(document.id),
        name: document.name,
    }
}

type NoteRepository = BaseRepository<Note, NoteDocument, InMemoryStore>;

fn repository() -> NoteRepository {
    let store = InMemoryStore::new("notes").with_validator(schema_validator::<NoteSchema>());
    NoteRepository::new(store, note_from_document)
}

fn unused_id() -> String {
    "65a1b2c3d4e5f60718293a4b".to_string()
}

#[tokio::test]
async fn test_save_assigns_id() {
    let repo = repository();

    let saved = assert_ok!(repo.save(Note::named("A")).await);

    let id = saved.id().unwrap();
    assert!(!id.is_empty());
    assert_eq!(repo.store().len().await, 1);
}

#[tokio::test]
async fn test_saved_entity_is_found_equal() {
    let repo = repository();
    let saved = repo.save(Note::named("A")).await.unwrap();

    let found = repo.find_by_id(saved.id().unwrap()).await.unwrap();

    assert_eq!(found, Some(saved.clone()));
    assert_eq!(found.unwrap().to_object().unwrap(), saved.to_object().unwrap());
}

#[tokio::test]
async fn test_find_missing_returns_none() {
    let repo = repository();

    let found = assert_ok!(repo.find_by_id(&unused_id()).await);

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_malformed_id_propagates_store_error() {
    let repo = repository();

    let err = assert_err!(repo.find_by_id("nope").await);

    assert!(matches!(err, AppError::InvalidId(_)));
}

#[tokio::test]
async fn test_save_rejects_identified_entity() {
    let repo = repository();
    let saved = repo.save(Note::named("A")).await.unwrap();

    let err = assert_err!(repo.save(saved).await);

    assert!(matches!(err, AppError::AlreadyPersisted { entity: "Note", .. }));
    assert_eq!(repo.store().len().await, 1);
}

#[tokio::test]
async fn test_save_treats_empty_id_as_unset() {
    let repo = repository();
    let note = Note {
        id: Some(String::new()),
        name: "A".to_string(),
    };

    let saved = assert_ok!(repo.save(note).await);

    assert!(!saved.id().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_missing_fails_without_write() {
    let repo = repository();
    let id = unused_id();

    let err = assert_err!(repo.update(&id, Note::named("B")).await);

    assert!(matches!(err, AppError::NotFound { entity: "Note", id: ref missing } if *missing == id));
    assert!(repo.store().is_empty().await);
}

#[tokio::test]
async fn test_update_missing_with_invalid_fields_is_not_found() {
    let repo = repository();

    let err = assert_err!(repo.update(&unused_id(), Note::named("")).await);

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_validation_failure_propagates() {
    let repo = repository();
    let saved = repo.save(Note::named("A")).await.unwrap();
    let id = saved.id().unwrap().to_string();

    let err = assert_err!(repo.update(&id, Note::named("")).await);

    assert!(matches!(err, AppError::Validation(ref m) if m == "Name is required"));
    let unchanged = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "A");
}

#[tokio::test]
async fn test_save_validation_failure_propagates() {
    let repo = repository();

    let err = assert_err!(repo.save(Note::named("")).await);

    assert!(matches!(err, AppError::Validation(_)));
    assert!(repo.store().is_empty().await);
}

#[tokio::test]
async fn test_delete_missing_fails() {
    let repo = repository();

    let err = assert_err!(repo.delete_by_id(&unused_id()).await);

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_then_find_returns_none() {
    let repo = repository();
    let saved = repo.save(Note::named("A")).await.unwrap();
    let id = saved.id().unwrap();

    assert_ok!(repo.delete_by_id(id).await);

    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_documents_never_leak_metadata() {
    let repo = repository();
    let saved = repo.save(Note::named("A")).await.unwrap();
    let id = saved.id().unwrap();

    let raw = repo.store().fetch_by_id(id).await.unwrap().unwrap();
    assert!(raw.contains_key("__v"));

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.to_object().unwrap(), saved.to_object().unwrap());
}

#[tokio::test]
async fn test_full_lifecycle() {
    let repo = repository();

    let saved = repo.save(Note::named("A")).await.unwrap();
    let id = saved.id().unwrap().to_string();
    assert!(!id.is_empty());

    let found = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.id(), Some(id.as_str()));
    assert_eq!(found.name, "A");

    let updated = repo.update(&id, Note::named("B")).await.unwrap();
    assert_eq!(updated.id(), Some(id.as_str()));

    let found = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.id(), Some(id.as_str()));
    assert_eq!(found.name, "B");

    repo.delete_by_id(&id).await.unwrap();
    assert!(repo.find_by_id(&id).await.unwrap().is_none());

    let err = assert_err!(repo.delete_by_id(&id).await);
    assert!(matches!(err, AppError::NotFound { entity: "Note", .. }));
}

#[tokio::test]
async fn test_repository_is_usable_as_trait_object() {
    let repo: Arc<dyn CrudRepository<Note>> = Arc::new(repository());

    let saved = repo.save(Note::named("A")).await.unwrap();
    let id = saved.id().unwrap().to_string();

    assert!(repo.find_by_id(&id).await.unwrap().is_some());
    repo.delete_by_id(&id).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_saves_get_distinct_ids() {
    let repo = Arc::new(repository());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.save(Note::named(&format!("n{}", i))).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let saved = handle.await.unwrap().unwrap();
        ids.push(saved.id().unwrap().to_string());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(repo.store().len().await, 8);
}
