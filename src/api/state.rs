//! Application state for shared services

use std::sync::Arc;

use crate::api::types::ApiError;
use crate::config::{AppConfig, AppInfoConfig};
use crate::domain::user::{
    CreateUserRequest, Page, PageRequest, UpdateUserRequest, User, UserRepository, UserStats,
};
use crate::domain::DomainError;
use crate::infrastructure::user::UserDirectory;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectoryTrait>,
    pub app: Arc<AppInfoConfig>,
    pub docs_url: String,
    /// Expose internal error messages to clients
    pub debug: bool,
}

/// Trait for user directory operations
#[async_trait::async_trait]
pub trait UserDirectoryTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn stats(&self) -> Result<UserStats, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserDirectoryTrait for UserDirectory<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserDirectory::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        UserDirectory::get(self, id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        UserDirectory::get_by_username(self, username).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        UserDirectory::get_by_email(self, email).await
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        UserDirectory::list(self, page).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, DomainError> {
        UserDirectory::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        UserDirectory::delete(self, id).await
    }

    async fn stats(&self) -> Result<UserStats, DomainError> {
        UserDirectory::stats(self).await
    }
}

impl AppState {
    /// Create new application state with the provided directory
    pub fn new(directory: Arc<dyn UserDirectoryTrait>, config: &AppConfig) -> Self {
        Self {
            directory,
            app: Arc::new(config.app.clone()),
            docs_url: config.api.docs_url.clone(),
            debug: config.server.debug,
        }
    }

    /// Convert a domain error, hiding internal details outside debug mode
    pub fn api_error(&self, err: DomainError) -> ApiError {
        let api_error = ApiError::from(err);

        if self.debug {
            api_error
        } else {
            api_error.redact_internal()
        }
    }
}
