//! Informational endpoints: welcome, health and project info

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// Welcome payload served at `/`
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: &'static str,
    pub environment: String,
    pub version: String,
    pub docs: String,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub environment: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Project description served at `/info`
#[derive(Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub description: String,
    pub features: Vec<&'static str>,
    pub tech_stack: Vec<&'static str>,
}

const FEATURES: &[&str] = &[
    "User CRUD over HTTP",
    "Username and email uniqueness",
    "Offset pagination",
    "Structured JSON responses",
    "Environment-driven configuration",
];

const TECH_STACK: &[&str] = &["Rust", "Tokio", "Axum", "Serde", "Tracing"];

/// GET /
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let response = RootResponse {
        message: format!("Welcome to {}!", state.app.name),
        status: "running",
        environment: state.app.environment.clone(),
        version: state.app.version.clone(),
        docs: state.docs_url.clone(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /health - returns 200 while the process is serving requests
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        environment: state.app.environment.clone(),
        version: state.app.version.clone(),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /info
pub async fn project_info(State(state): State<AppState>) -> impl IntoResponse {
    let response = InfoResponse {
        name: state.app.name.clone(),
        description: state.app.description.clone(),
        features: FEATURES.to_vec(),
        tech_stack: TECH_STACK.to_vec(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            environment: "development".to_string(),
            version: "1.0.0".to_string(),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"timestamp\""));
    }

    #[test]
    fn test_info_lists_are_populated() {
        assert!(!FEATURES.is_empty());
        assert!(TECH_STACK.contains(&"Axum"));
    }
}
