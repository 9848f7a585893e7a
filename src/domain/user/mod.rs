//! User domain
//!
//! Domain types and traits for the user directory: the user entity,
//! validation rules, request types, pagination and the repository port.

mod clock;
mod entity;
mod id_generator;
mod pagination;
mod repository;
mod request;
mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{User, UserId};
pub use id_generator::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use pagination::{
    Page, PageRequest, PaginationInfo, UserStats, DEFAULT_PAGE_LIMIT,
};
pub use repository::UserRepository;
pub use request::{CreateUserRequest, NewUser, UpdateUserRequest, UserChanges};
pub use validation::{
    normalize_email, normalize_username, validate_email, validate_full_name, validate_password,
    validate_username, UserValidationError,
};
