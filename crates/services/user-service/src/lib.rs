//! User Service Library
//!
//! User management on top of the generic document repository. It can be
//! driven from the bundled CLI against MongoDB or against an in-memory
//! collection.

pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppError, AppResult};
use domain::{Entity, UserRole};
use persistence::Database;

use crate::config::UserServiceConfig;
use crate::repository::{in_memory_user_store, mongo_user_store, UserRepository};
use crate::service::{UserManager, UserService};

/// Backing store selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    InMemory,
}

/// Build the user service over the selected backend.
pub async fn build_service(config: &UserServiceConfig, backend: Backend) -> AppResult<UserManager> {
    let repo: Arc<UserRepository> = match backend {
        Backend::Mongo => {
            let db = Database::connect(&config.mongo).await?;
            Arc::new(mongo_user_store(&db, &config.collection))
        }
        Backend::InMemory => {
            info!(collection = %config.collection, "Using in-memory store");
            Arc::new(in_memory_user_store(&config.collection))
        }
    };

    Ok(UserManager::new(repo))
}

/// Walk one user through its whole lifecycle, logging each step.
///
/// Fails if any step does not behave as expected.
pub async fn run_demo(service: &dyn UserService) -> AppResult<()> {
    let user = service
        .create_user("ada@example.com".to_string(), "A".to_string())
        .await?;
    let id = user
        .id()
        .map(str::to_string)
        .ok_or_else(|| AppError::internal("saved user has no id"))?;
    info!(id = %id, "Saved");

    let found = service.get_user(&id).await?;
    info!(id = %id, name = %found.name, "Found");

    service.rename_user(&id, "B".to_string()).await?;
    service.change_role(&id, UserRole::Admin).await?;
    let found = service.get_user(&id).await?;
    info!(id = %id, name = %found.name, role = %found.role, "Updated");

    service.delete_user(&id).await?;
    let absent = service.find_user(&id).await?.is_none();
    info!(id = %id, absent, "Deleted");

    match service.delete_user(&id).await {
        Err(e) if e.is_not_found() => {
            info!(id = %id, "Second delete reported: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
        Ok(()) => Err(AppError::internal("second delete unexpectedly succeeded")),
    }
}
