//! User repository wiring.
//!
//! Users need no repository code of their own: the generic repository is
//! bound to the users collection, the [`UserDocument`] shape and the
//! `User::from` factory. Writes are checked against the field rules
//! declared on `User` itself.

use domain::User;
use persistence::{
    schema_validator, BaseRepository, CrudRepository, Database, InMemoryStore, MongoStore,
};

use super::entities::UserDocument;

/// User repository trait object used for dependency injection.
pub type UserRepository = dyn CrudRepository<User>;

/// Generic repository bound to user documents over the store `S`
pub type UserStore<S> = BaseRepository<User, UserDocument, S>;

/// User repository over a MongoDB collection
pub fn mongo_user_store(db: &Database, collection: &str) -> UserStore<MongoStore> {
    let store = db
        .store(collection)
        .with_validator(schema_validator::<User>());

    UserStore::new(store, User::from)
}

/// User repository over a fresh in-memory collection
pub fn in_memory_user_store(collection: &str) -> UserStore<InMemoryStore> {
    let store = InMemoryStore::new(collection).with_validator(schema_validator::<User>());

    UserStore::new(store, User::from)
}
