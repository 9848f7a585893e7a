//! User infrastructure module
//!
//! In-memory storage for user records and the directory service that
//! validates requests before they reach it.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::UserDirectory;
