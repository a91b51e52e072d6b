//! Rejection types for [`AdminSession`].
//!
//! [`AdminSession`]: super::AdminSession

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

/// Error that can occur while authenticating an admin.
#[derive(Debug, Error)]
pub enum AdminRejection
{
	/// The `admin_token` cookie is missing.
	#[error("missing admin cookie")]
	MissingCookie,

	/// The `admin_token` cookie does not hold the admin token.
	#[error("invalid admin token")]
	InvalidToken,
}

impl IntoProblemDetails for AdminRejection
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Unauthorized
	}
}

impl IntoResponse for AdminRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}
