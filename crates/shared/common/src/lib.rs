//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for persistence and domain failures
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
