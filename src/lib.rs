//! User Directory API
//!
//! An HTTP service over an in-memory user directory:
//! - Create, read, update and delete user records
//! - Username and email uniqueness enforced atomically
//! - Offset pagination and activity statistics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use axum::Router;
use infrastructure::user::{InMemoryUserRepository, UserDirectory};
use tracing::info;

/// Create the application state with a fresh, empty directory
pub fn create_app_state(config: &AppConfig) -> AppState {
    let repository = Arc::new(InMemoryUserRepository::new());
    let directory = Arc::new(UserDirectory::new(repository));

    info!(environment = %config.app.environment, "User directory initialized");

    AppState::new(directory, config)
}

/// Build the complete HTTP application for a configuration
pub fn create_app(config: &AppConfig) -> Router {
    api::create_router(create_app_state(config), config)
}
