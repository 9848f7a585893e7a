//! Infrastructure layer - storage, services and process setup

pub mod logging;
pub mod user;
