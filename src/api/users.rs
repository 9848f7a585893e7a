//! User directory endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{codes, ApiError, ApiResponse, Json};
use crate::domain::user::{
    CreateUserRequest, PageRequest, UpdateUserRequest, User, UserStats, DEFAULT_PAGE_LIMIT,
};
use crate::domain::DomainError;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

/// Query parameters for listing users
#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl ListUsersQuery {
    fn page_request(&self) -> Result<PageRequest, DomainError> {
        PageRequest::new(self.skip, self.limit)
    }
}

/// Payload returned by DELETE
#[derive(Debug, Clone, Serialize)]
pub struct DeletedUser {
    pub id: String,
    pub deleted: bool,
}

fn user_not_found(key: &str, value: &str) -> ApiError {
    DomainError::not_found(format!("User with {} '{}' not found", key, value)).into()
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    debug!(username = %request.username, "Creating user");

    let user = state
        .directory
        .create(request)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data("User created successfully", user)),
    ))
}

/// GET /users?skip=&limit=
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> ApiResult<Vec<User>> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(codes::INVALID_QUERY, e.body_text()))?;
    let page_request = query.page_request().map_err(|e| state.api_error(e))?;

    let page = state
        .directory
        .list(page_request)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(ApiResponse::paginated(
        "Users retrieved successfully",
        page.items,
        page.pagination,
    )))
}

/// GET /users/stats
pub async fn user_stats(State(state): State<AppState>) -> ApiResult<UserStats> {
    let stats = state
        .directory
        .stats()
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(ApiResponse::data(
        "User statistics retrieved successfully",
        stats,
    )))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<User> {
    let user = state
        .directory
        .get(&user_id)
        .await
        .map_err(|e| state.api_error(e))?
        .ok_or_else(|| user_not_found("id", &user_id))?;

    Ok(Json(ApiResponse::data("User retrieved successfully", user)))
}

/// GET /users/by-username/{username}
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<User> {
    let user = state
        .directory
        .get_by_username(&username)
        .await
        .map_err(|e| state.api_error(e))?
        .ok_or_else(|| user_not_found("username", &username))?;

    Ok(Json(ApiResponse::data("User retrieved successfully", user)))
}

/// GET /users/by-email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<User> {
    let user = state
        .directory
        .get_by_email(&email)
        .await
        .map_err(|e| state.api_error(e))?
        .ok_or_else(|| user_not_found("email", &email))?;

    Ok(Json(ApiResponse::data("User retrieved successfully", user)))
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    debug!(user_id = %user_id, "Updating user");

    let user = state
        .directory
        .update(&user_id, request)
        .await
        .map_err(|e| state.api_error(e))?
        .ok_or_else(|| user_not_found("id", &user_id))?;

    Ok(Json(ApiResponse::data("User updated successfully", user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<DeletedUser> {
    debug!(user_id = %user_id, "Deleting user");

    let deleted = state
        .directory
        .delete(&user_id)
        .await
        .map_err(|e| state.api_error(e))?;

    if !deleted {
        return Err(user_not_found("id", &user_id));
    }

    Ok(Json(ApiResponse::data(
        "User deleted successfully",
        DeletedUser {
            id: user_id,
            deleted: true,
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();

        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert!(query.page_request().is_ok());
    }

    #[test]
    fn test_list_query_limit_bounds() {
        let zero = ListUsersQuery { skip: 0, limit: 0 };
        assert!(matches!(
            zero.page_request(),
            Err(DomainError::InvalidArgument { .. })
        ));

        let large = ListUsersQuery {
            skip: usize::MAX,
            limit: usize::MAX,
        };
        let page = large.page_request().unwrap();
        assert_eq!(page.range(3), 3..3);
    }

    #[test]
    fn test_user_not_found_maps_to_404() {
        let err = user_not_found("username", "ghost");

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, codes::NOT_FOUND);
        assert_eq!(err.message, "User with username 'ghost' not found");
    }

    #[test]
    fn test_deleted_user_serialization() {
        let json = serde_json::to_value(DeletedUser {
            id: "user-1".to_string(),
            deleted: true,
        })
        .unwrap();

        assert_eq!(json["id"], "user-1");
        assert_eq!(json["deleted"], true);
    }
}
