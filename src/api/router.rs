use axum::{
    http::{HeaderName, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::health;
use super::middleware::{logging_middleware, REQUEST_ID_HEADER};
use super::state::AppState;
use super::types::ApiError;
use super::users;
use crate::config::{AppConfig, CorsConfig};

/// Create the full router with application state
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = match normalize_prefix(&config.api.prefix) {
        Some(prefix) => Router::new().nest(&prefix, users_router()),
        None => users_router(),
    };

    Router::new()
        // Informational endpoints
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/info", get(health::project_info))
        // User directory
        .merge(api)
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/stats", get(users::user_stats))
        .route(
            "/users/by-username/{username}",
            get(users::get_user_by_username),
        )
        .route("/users/by-email/{email}", get(users::get_user_by_email))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}

/// `"/api/v1/"` -> `Some("/api/v1")`; empty or `/` means no prefix
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');

    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

/// Build the CORS layer; a `*` origin mirrors the caller's origin so credentials keep working
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = config
            .origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api/v1"), Some("/api/v1".to_string()));
        assert_eq!(normalize_prefix("api/v1/"), Some("/api/v1".to_string()));
        assert_eq!(normalize_prefix("/"), None);
        assert_eq!(normalize_prefix(""), None);
    }
}
