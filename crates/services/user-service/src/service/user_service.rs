//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{Entity, User, UserRole};
use persistence::{DeleteRepository, ReadRepository, WriteRepository};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create and persist a new user with the default role
    async fn create_user(&self, email: String, name: String) -> AppResult<User>;

    /// Get user by ID, failing with NotFound when absent
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Look up user by ID, absence is `None`
    async fn find_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Change the user's display name
    async fn rename_user(&self, id: &str, name: String) -> AppResult<User>;

    /// Change the user's role
    async fn change_role(&self, id: &str, role: UserRole) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, email: String, name: String) -> AppResult<User> {
        let user = self.repo.save(User::new(email, name)?).await?;
        tracing::info!(id = ?user.id(), "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(User::KIND, id)
    }

    async fn find_user(&self, id: &str) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn rename_user(&self, id: &str, name: String) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        user.rename(name)?;

        let user = self.repo.update(id, user).await?;
        tracing::info!(id = %id, "User renamed");
        Ok(user)
    }

    async fn change_role(&self, id: &str, role: UserRole) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        user.update_role(role);

        let user = self.repo.update(id, user).await?;
        tracing::info!(id = %id, role = %user.role, "User role changed");
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(id = %id, "User deleted");
        Ok(())
    }
}
