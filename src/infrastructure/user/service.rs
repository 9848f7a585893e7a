//! User directory service: validation, identity and timestamps on top of a repository

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{
    Clock, CreateUserRequest, IdGenerator, Page, PageRequest, SystemClock, UpdateUserRequest,
    User, UserId, UserRepository, UserStats, UuidGenerator,
};
use crate::domain::DomainError;

/// Owns the user records of one application instance.
///
/// Validation happens here before the repository is touched; uniqueness is
/// enforced by the repository in the same critical section as the write.
#[derive(Debug)]
pub struct UserDirectory<R: UserRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<R: UserRepository> UserDirectory<R> {
    /// Create a directory using the system clock and UUID identifiers
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_collaborators(repository, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Create a directory with explicit time and ID sources
    pub fn with_collaborators(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            clock,
            ids,
        }
    }

    /// Register a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let new_user = request.validate().inspect_err(|e| {
            warn!(error = %e, "Rejected user creation");
        })?;

        let user = User::new(
            self.ids.generate(),
            new_user.email,
            new_user.username,
            self.clock.now(),
        )
        .with_full_name(new_user.full_name)
        .with_active(new_user.is_active);

        match self.repository.create(user).await {
            Ok(user) => {
                info!(user_id = %user.id(), username = %user.username(), "Created user");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create user");
                Err(e)
            }
        }
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        debug!(user_id = %id, "Getting user");
        self.repository.get(&UserId::from(id)).await
    }

    /// Get a user by username, case-insensitively
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        debug!(username = %username, "Getting user by username");
        self.repository.get_by_username(username).await
    }

    /// Get a user by email, case-insensitively
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        debug!(email = %email, "Getting user by email");
        self.repository.get_by_email(email).await
    }

    /// List one page of users in insertion order
    pub async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        debug!(skip = page.skip(), limit = page.limit(), "Listing users");
        self.repository.list(page).await
    }

    /// Apply a partial update.
    ///
    /// Returns `Ok(None)` when no user has this ID. Either every supplied
    /// field is applied or none is.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, DomainError> {
        let changes = request.validate().inspect_err(|e| {
            warn!(user_id = %id, error = %e, "Rejected user update");
        })?;

        let result = self
            .repository
            .update(&UserId::from(id), changes, self.clock.now())
            .await;

        match &result {
            Ok(Some(user)) => info!(user_id = %id, username = %user.username(), "Updated user"),
            Ok(None) => debug!(user_id = %id, "User to update not found"),
            Err(e) => warn!(user_id = %id, error = %e, "Failed to update user"),
        }

        result
    }

    /// Delete a user; `false` when the ID is unknown
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self.repository.delete(&UserId::from(id)).await?;

        if deleted {
            info!(user_id = %id, "Deleted user");
        } else {
            debug!(user_id = %id, "User to delete not found");
        }

        Ok(deleted)
    }

    /// Total, active and inactive counts
    pub async fn stats(&self) -> Result<UserStats, DomainError> {
        self.repository.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{ManualClock, PaginationInfo, SequentialIdGenerator};
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use chrono::{Duration, Utc};
    use tokio_test::{assert_err, assert_ok};

    fn create_directory() -> UserDirectory<InMemoryUserRepository> {
        UserDirectory::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn create_directory_with_clock(
        clock: Arc<ManualClock>,
    ) -> UserDirectory<InMemoryUserRepository> {
        UserDirectory::with_collaborators(
            Arc::new(InMemoryUserRepository::new()),
            clock,
            Arc::new(SequentialIdGenerator::new("user")),
        )
    }

    fn make_request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            username: username.to_string(),
            full_name: None,
            is_active: true,
            password: "Password1".to_string(),
        }
    }

    async fn snapshot(directory: &UserDirectory<InMemoryUserRepository>) -> Vec<User> {
        directory
            .list(PageRequest::new(0, 1000).unwrap())
            .await
            .unwrap()
            .items
    }

    #[tokio::test]
    async fn test_create_user_is_retrievable_everywhere() {
        let directory = create_directory();

        let user = directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();

        assert_eq!(user.created_at(), user.updated_at());
        assert!(user.is_active());

        let by_id = directory.get(user.id().as_str()).await.unwrap();
        let by_username = directory.get_by_username("alice").await.unwrap();
        let by_email = directory.get_by_email("alice@example.com").await.unwrap();

        assert_eq!(by_id.as_ref(), Some(&user));
        assert_eq!(by_username.as_ref(), Some(&user));
        assert_eq!(by_email.as_ref(), Some(&user));
    }

    #[tokio::test]
    async fn test_username_is_normalized() {
        let directory = create_directory();

        let user = directory
            .create(make_request("John_Doe", "john@example.com"))
            .await
            .unwrap();

        assert_eq!(user.username(), "john_doe");
        assert!(directory.get_by_username("john_doe").await.unwrap().is_some());
        assert!(directory.get_by_username("JOHN_DOE").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_any_case_conflicts() {
        let directory = create_directory();
        directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let before = snapshot(&directory).await;

        let result = directory
            .create(make_request("ALICE", "other@example.com"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { ref field, .. }) if field == "username"));
        assert_eq!(snapshot(&directory).await, before);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let directory = create_directory();
        directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let before = snapshot(&directory).await;

        let result = directory
            .create(make_request("bob", "alice@example.com"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { ref field, .. }) if field == "email"));
        assert_eq!(snapshot(&directory).await, before);
    }

    #[tokio::test]
    async fn test_weak_passwords_are_rejected() {
        let directory = create_directory();

        for password in ["short1", "alllowercase1", "NoDigitsHere"] {
            let mut request = make_request("alice", "alice@example.com");
            request.password = password.to_string();

            let result = directory.create(request).await;
            assert!(
                matches!(result, Err(DomainError::Validation { ref errors }) if errors[0].field == "password"),
                "{password} should be rejected"
            );
        }

        assert_eq!(directory.stats().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_update_absent_id_returns_none() {
        let directory = create_directory();
        directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let before = snapshot(&directory).await;

        let request = UpdateUserRequest {
            full_name: Some("Nobody".to_string()),
            ..Default::default()
        };
        let result = directory.update("missing", request).await.unwrap();

        assert!(result.is_none());
        assert_eq!(snapshot(&directory).await, before);
    }

    #[tokio::test]
    async fn test_update_full_name_only() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let directory = create_directory_with_clock(clock.clone());
        let user = directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();

        clock.advance(Duration::seconds(60));

        let request = UpdateUserRequest {
            full_name: Some("Alice Liddell".to_string()),
            ..Default::default()
        };
        let updated = directory
            .update(user.id().as_str(), request)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.full_name(), Some("Alice Liddell"));
        assert_eq!(updated.email(), user.email());
        assert_eq!(updated.username(), user.username());
        assert_eq!(updated.is_active(), user.is_active());
        assert_eq!(updated.created_at(), user.created_at());
        assert_eq!(updated.updated_at(), user.created_at() + Duration::seconds(60));
        assert_eq!(
            directory.get_by_username("alice").await.unwrap().map(|u| u.id().clone()),
            Some(user.id().clone())
        );
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let directory = create_directory();
        directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = directory
            .create(make_request("bob", "bob@example.com"))
            .await
            .unwrap();

        let request = UpdateUserRequest {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let result = directory.update(bob.id().as_str(), request).await;

        assert!(matches!(result, Err(DomainError::Conflict { ref field, .. }) if field == "email"));
        assert_eq!(directory.get(bob.id().as_str()).await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn test_update_is_all_or_nothing() {
        let directory = create_directory();
        directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = directory
            .create(make_request("bob", "bob@example.com"))
            .await
            .unwrap();

        let request = UpdateUserRequest {
            email: Some("robert@example.com".to_string()),
            username: Some("alice".to_string()),
            ..Default::default()
        };
        assert_err!(directory.update(bob.id().as_str(), request).await);

        assert_eq!(directory.get(bob.id().as_str()).await.unwrap(), Some(bob));
        assert!(directory
            .get_by_email("robert@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_invalid_field_is_validation_error() {
        let directory = create_directory();
        let user = directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let request = UpdateUserRequest {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        let result = directory.update(user.id().as_str(), request).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(directory.get(user.id().as_str()).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_delete_removes_from_all_lookups() {
        let directory = create_directory();
        let user = directory
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(assert_ok!(directory.delete(user.id().as_str()).await));
        assert!(!directory.delete(user.id().as_str()).await.unwrap());

        assert!(directory.get(user.id().as_str()).await.unwrap().is_none());
        assert!(directory.get_by_username("alice").await.unwrap().is_none());
        assert!(directory
            .get_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_first_page() {
        let directory = UserDirectory::with_collaborators(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(SystemClock),
            Arc::new(SequentialIdGenerator::new("user")),
        );
        for name in ["aaa", "bbb", "ccc"] {
            directory
                .create(make_request(name, &format!("{name}@example.com")))
                .await
                .unwrap();
        }

        let page = directory.list(PageRequest::new(0, 2).unwrap()).await.unwrap();
        let ids: Vec<&str> = page.items.iter().map(|u| u.id().as_str()).collect();

        assert_eq!(ids, vec!["user-1", "user-2"]);
        assert_eq!(
            page.pagination,
            PaginationInfo {
                page: 1,
                per_page: 2,
                total: 3,
                pages: 2
            }
        );
    }

    #[tokio::test]
    async fn test_stats_after_deactivation() {
        let directory = create_directory();
        let mut ids = Vec::new();
        for name in ["aaa", "bbb", "ccc"] {
            let user = directory
                .create(make_request(name, &format!("{name}@example.com")))
                .await
                .unwrap();
            ids.push(user.id().clone());
        }

        let request = UpdateUserRequest {
            is_active: Some(false),
            ..Default::default()
        };
        directory.update(ids[1].as_str(), request).await.unwrap();

        assert_eq!(
            directory.stats().await.unwrap(),
            UserStats {
                total: 3,
                active: 2,
                inactive: 1
            }
        );
    }

    #[tokio::test]
    async fn test_directories_are_independent() {
        let first = create_directory();
        let second = create_directory();

        first
            .create(make_request("alice", "alice@example.com"))
            .await
            .unwrap();

        assert_ok!(
            second
                .create(make_request("alice", "alice@example.com"))
                .await
        );
    }
}
