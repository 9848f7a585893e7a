//! User repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::{User, UserId};
use super::pagination::{Page, PageRequest, UserStats};
use super::request::UserChanges;
use crate::domain::DomainError;

/// Storage for user records and their username/email indexes.
///
/// Implementations enforce uniqueness inside the same critical section that
/// applies a change, so a failed `create` or `update` leaves no trace.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by normalized username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user, failing with `Conflict` on a taken username or email
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Apply validated changes to an existing user.
    ///
    /// Returns `Ok(None)` when the ID is unknown.
    async fn update(
        &self,
        id: &UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError>;

    /// Delete a user and its index entries
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// List users in insertion order
    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError>;

    /// Count total, active and inactive users
    async fn stats(&self) -> Result<UserStats, DomainError>;
}
