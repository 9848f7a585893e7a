//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{
    normalize_email, normalize_username, Page, PageRequest, User, UserChanges, UserId,
    UserRepository, UserStats,
};
use crate::domain::DomainError;

/// Primary store plus both secondary indexes, always mutated together
#[derive(Debug, Default)]
struct Directory {
    /// Insertion-ordered primary store
    users: IndexMap<UserId, User>,
    /// Normalized username -> user ID
    username_index: HashMap<String, UserId>,
    /// Normalized email -> user ID
    email_index: HashMap<String, UserId>,
}

impl Directory {
    fn resolve(&self, id: Option<&UserId>) -> Option<User> {
        id.and_then(|id| self.users.get(id)).cloned()
    }

    /// Fails if `key` is indexed by a record other than `owner`
    fn check_free(
        index: &HashMap<String, UserId>,
        key: &str,
        owner: Option<&UserId>,
        field: &str,
        label: &str,
        value: &str,
    ) -> Result<(), DomainError> {
        match index.get(key) {
            Some(existing) if Some(existing) != owner => Err(DomainError::conflict(
                field,
                format!("{} '{}' already exists", label, value),
            )),
            _ => Ok(()),
        }
    }
}

/// In-memory implementation of UserRepository
///
/// A single lock guards the store and both indexes, so readers never observe
/// a record without its index entries or the other way around.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    directory: RwLock<Directory>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        Ok(directory.users.get(id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        let key = normalize_username(username);
        Ok(directory.resolve(directory.username_index.get(&key)))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let directory = self.directory.read().await;
        let key = normalize_email(email);
        Ok(directory.resolve(directory.email_index.get(&key)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut directory = self.directory.write().await;

        let username_key = normalize_username(user.username());
        let email_key = normalize_email(user.email());

        Directory::check_free(
            &directory.username_index,
            &username_key,
            None,
            "username",
            "Username",
            user.username(),
        )?;
        Directory::check_free(
            &directory.email_index,
            &email_key,
            None,
            "email",
            "Email",
            user.email(),
        )?;

        if directory.users.contains_key(user.id()) {
            return Err(DomainError::internal(format!(
                "Generated user ID '{}' is already in use",
                user.id()
            )));
        }

        let id = user.id().clone();
        directory.username_index.insert(username_key, id.clone());
        directory.email_index.insert(email_key, id.clone());
        directory.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let mut directory = self.directory.write().await;

        let Some(current) = directory.users.get(id) else {
            return Ok(None);
        };

        let old_username_key = normalize_username(current.username());
        let old_email_key = normalize_email(current.email());
        let new_email_key = changes.email.as_deref().map(normalize_email);
        let new_username_key = changes.username.as_deref().map(normalize_username);

        // Every check runs before anything is written
        if let (Some(key), Some(email)) = (&new_email_key, &changes.email) {
            Directory::check_free(&directory.email_index, key, Some(id), "email", "Email", email)?;
        }

        if let (Some(key), Some(username)) = (&new_username_key, &changes.username) {
            Directory::check_free(
                &directory.username_index,
                key,
                Some(id),
                "username",
                "Username",
                username,
            )?;
        }

        if let Some(key) = new_email_key {
            directory.email_index.remove(&old_email_key);
            directory.email_index.insert(key, id.clone());
        }

        if let Some(key) = new_username_key {
            directory.username_index.remove(&old_username_key);
            directory.username_index.insert(key, id.clone());
        }

        let touched = !changes.is_empty();
        let Some(user) = directory.users.get_mut(id) else {
            return Err(DomainError::internal(format!(
                "User '{}' disappeared during update",
                id
            )));
        };

        if let Some(email) = changes.email {
            user.set_email(email);
        }
        if let Some(username) = changes.username {
            user.set_username(username);
        }
        if let Some(full_name) = changes.full_name {
            user.set_full_name(full_name);
        }
        if let Some(is_active) = changes.is_active {
            user.set_active(is_active);
        }
        if touched {
            user.touch(now);
        }

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut directory = self.directory.write().await;

        // shift_remove keeps the remaining records in insertion order
        let Some(user) = directory.users.shift_remove(id) else {
            return Ok(false);
        };

        directory
            .username_index
            .remove(&normalize_username(user.username()));
        directory.email_index.remove(&normalize_email(user.email()));

        Ok(true)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        let directory = self.directory.read().await;
        let total = directory.users.len();
        let window = page.range(total);

        let items = directory
            .users
            .values()
            .skip(window.start)
            .take(window.len())
            .cloned()
            .collect();

        Ok(Page {
            items,
            pagination: page.info(total),
        })
    }

    async fn stats(&self) -> Result<UserStats, DomainError> {
        let directory = self.directory.read().await;
        let active = directory.users.values().filter(|u| u.is_active()).count();

        Ok(UserStats::new(directory.users.len(), active))
    }
}
