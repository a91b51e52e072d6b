//! API services.
//!
//! These contain the core business logic.
//!
//! If a service directly maps to an HTTP route, it will have an `http` module
//! containing the handlers and an `Into<axum::Router>` implementation.

pub mod auth;
pub use auth::AuthService;

pub mod health;
pub use health::HealthService;

pub mod storage;
pub use storage::StorageService;

pub mod courses;
pub use courses::CourseService;

pub mod import;
pub use import::ImportService;

pub mod users;
pub use users::UserService;
