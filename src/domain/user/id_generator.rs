//! User ID generation

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::entity::UserId;

/// Produces unique user identifiers
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> UserId;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> UserId {
        UserId::new(Uuid::new_v4().to_string())
    }
}

/// Predictable `<prefix>-<n>` identifiers
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> UserId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        UserId::new(format!("{}-{}", self.prefix, n))
    }
}
