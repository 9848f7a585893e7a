//! Create and update requests for the user directory

use serde::Deserialize;

use super::validation::{
    normalize_username, validate_email, validate_full_name, validate_password, validate_username,
    UserValidationError,
};
use crate::domain::error::{DomainError, FieldError};

fn default_active() -> bool {
    true
}

/// Request for registering a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Checked for strength only; never stored
    pub password: String,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A create request that passed validation, with normalized values
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
}

/// An update request that passed validation, with normalized values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
    }
}

fn collect(errors: &mut Vec<FieldError>, result: Result<(), UserValidationError>) {
    if let Err(e) = result {
        errors.push(e.into());
    }
}

impl CreateUserRequest {
    /// Check every field and return the normalized values, or all failures at once
    pub fn validate(&self) -> Result<NewUser, DomainError> {
        let mut errors = Vec::new();

        collect(&mut errors, validate_email(&self.email));
        collect(&mut errors, validate_username(&self.username));

        if let Some(full_name) = &self.full_name {
            collect(&mut errors, validate_full_name(full_name));
        }

        collect(&mut errors, validate_password(&self.password));

        if !errors.is_empty() {
            return Err(DomainError::validation_errors(errors));
        }

        Ok(NewUser {
            email: self.email.trim().to_string(),
            username: normalize_username(&self.username),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
        })
    }
}

impl UpdateUserRequest {
    /// Check every supplied field and return the normalized changes
    pub fn validate(&self) -> Result<UserChanges, DomainError> {
        let mut errors = Vec::new();

        if let Some(email) = &self.email {
            collect(&mut errors, validate_email(email));
        }

        if let Some(username) = &self.username {
            collect(&mut errors, validate_username(username));
        }

        if let Some(full_name) = &self.full_name {
            collect(&mut errors, validate_full_name(full_name));
        }

        if !errors.is_empty() {
            return Err(DomainError::validation_errors(errors));
        }

        Ok(UserChanges {
            email: self.email.as_deref().map(|e| e.trim().to_string()),
            username: self.username.as_deref().map(normalize_username),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
        })
    }
}
