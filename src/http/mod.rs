//! HTTP plumbing shared by every service.
//!
//! This contains extractors with consistent error responses, and the
//! [`ProblemDetails`] type every handler error is turned into.

pub mod problem_details;
pub use problem_details::ProblemDetails;

pub mod extract;
