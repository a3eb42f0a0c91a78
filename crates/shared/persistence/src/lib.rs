//! Persistence layer - generic document repositories.
//!
//! One [`BaseRepository`] implementation serves every entity type. It is
//! bound at construction to a [`DocumentStore`] handle and an entity factory
//! (document -> entity), and exposes find / save / update / delete with
//! uniform not-found semantics:
//!
//! - `find_by_id` on a missing id yields `Ok(None)`
//! - `update` and `delete_by_id` on a missing id fail with `AppError::NotFound`
//!
//! Stores:
//! - [`MongoStore`]: a MongoDB collection through the official driver
//! - [`InMemoryStore`]: a process-local collection with the same contract

pub mod db;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod schema;
pub mod store;

pub use db::Database;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use repository::{
    BaseRepository, CrudRepository, DeleteRepository, ReadRepository, WriteRepository,
};
pub use schema::{schema_validator, FieldValidator};
pub use store::{strip_metadata, DocumentStore, ENTITY_ID_FIELD, STORE_ID_FIELD, VERSION_KEY};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDocumentStore;
