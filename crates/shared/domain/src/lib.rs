//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Every persisted type implements [`Entity`], which is all the generic
//! repository needs to know about it. Field rules are declared with the
//! `validator` derive so stores can enforce the same rules on write.

pub mod constants;
pub mod entity;
pub mod error;
pub mod user;

pub use constants::*;
pub use entity::{to_attributes, Attributes, Entity};
pub use error::{DomainError, DomainResult};
pub use user::{validate_name, User, UserRole};
