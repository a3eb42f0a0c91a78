//! Repository layer for data access.

pub mod entities;
mod user_repository;

pub use user_repository::{in_memory_user_store, mongo_user_store, UserRepository, UserStore};
