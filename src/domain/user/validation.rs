//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::error::FieldError;

/// Regex pattern for accepted email addresses
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid email format: '{0}'")]
    InvalidEmail(String),

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username must contain only letters, numbers, and underscores")]
    InvalidUsernameCharacters,

    #[error("Full name exceeds maximum length of {0} characters")]
    FullNameTooLong(usize),

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one number")]
    PasswordMissingDigit,
}

impl UserValidationError {
    /// Name of the request field this error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "email",
            Self::UsernameTooShort(_)
            | Self::UsernameTooLong(_)
            | Self::InvalidUsernameCharacters => "username",
            Self::FullNameTooLong(_) => "full_name",
            Self::PasswordTooShort(_)
            | Self::PasswordMissingUppercase
            | Self::PasswordMissingLowercase
            | Self::PasswordMissingDigit => "password",
        }
    }
}

impl From<UserValidationError> for FieldError {
    fn from(err: UserValidationError) -> Self {
        FieldError::new(err.field(), err.to_string())
    }
}

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_FULL_NAME_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Canonical form used for email storage keys and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Canonical form of a username
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Validate an email address
///
/// Requires `local@domain.tld` with a top-level segment of at least two letters.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if !EMAIL_PATTERN.is_match(email.trim()) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - 3 to 50 characters
/// - Only letters, digits and underscores, with at least one non-underscore
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    let username = username.trim();
    let length = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if length > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    let mut remainder = username.chars().filter(|c| *c != '_').peekable();

    if remainder.peek().is_none() || !remainder.all(char::is_alphanumeric) {
        return Err(UserValidationError::InvalidUsernameCharacters);
    }

    Ok(())
}

/// Validate an optional display name
pub fn validate_full_name(full_name: &str) -> Result<(), UserValidationError> {
    if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(UserValidationError::FullNameTooLong(MAX_FULL_NAME_LENGTH));
    }

    Ok(())
}

/// Validate password strength
///
/// Rules:
/// - Minimum 8 characters
/// - At least one uppercase, one lowercase letter and one digit
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(UserValidationError::PasswordMissingUppercase);
    }

    if !password.chars().any(char::is_lowercase) {
        return Err(UserValidationError::PasswordMissingLowercase);
    }

    if !password.chars().any(char::is_numeric) {
        return Err(UserValidationError::PasswordMissingDigit);
    }

    Ok(())
}
