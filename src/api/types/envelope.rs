//! Response envelope shared by every endpoint

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::user::PaginationInfo;

/// Standard response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: Utc::now(),
            data: Some(data),
            pagination: None,
            error_code: None,
            details: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful response carrying one page of items
    pub fn paginated(message: impl Into<String>, items: Vec<T>, pagination: PaginationInfo) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::data(message, items)
        }
    }
}

impl ApiResponse<()> {
    /// Failed response with a machine-readable code
    pub fn error(message: impl Into<String>, error_code: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
            pagination: None,
            error_code: Some(error_code.into()),
            details,
        }
    }
}
