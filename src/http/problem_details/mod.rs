//! HTTP error responses.
//!
//! The [`ProblemDetails`] can be used for HTTP responses, as it implements
//! [`IntoResponse`]. It can be created from any error type that implements
//! [`IntoProblemDetails`].
//!
//! The body is loosely modeled after [RFC 9457], but uses the field names the
//! admin dashboard expects:
//!
//! ```json
//! { "error": "<problem title>", "details": "<error message>", ...extension members }
//! ```
//!
//! [RFC 9457]: https://www.rfc-editor.org/rfc/rfc9457.html

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tap::Tap;

pub(crate) mod problem_type;
pub use problem_type::ProblemType;

mod extension_members;
pub use extension_members::ExtensionMembers;

mod into_problem_details;
pub use into_problem_details::IntoProblemDetails;

/// An HTTP error response.
#[derive(Debug, Serialize)]
pub struct ProblemDetails
{
	/// The problem type.
	#[serde(skip_serializing)]
	problem_type: ProblemType,

	/// Short, human-readable, description of the problem type.
	error: &'static str,

	/// Short, human-readable, error message describing this particular problem.
	details: String,

	/// Any extra details that will be included in the response body.
	#[serde(flatten)]
	extra: ExtensionMembers,
}

impl ProblemDetails
{
	/// The problem type of this response.
	pub fn problem_type(&self) -> ProblemType
	{
		self.problem_type
	}
}

impl<E> From<E> for ProblemDetails
where
	E: IntoProblemDetails,
{
	#[track_caller]
	fn from(error: E) -> Self
	{
		let problem_type = error.problem_type();

		if problem_type.status().is_server_error() {
			tracing::error!(loc = %Location::caller(), ?error, "creating error response");
		} else {
			tracing::debug!(loc = %Location::caller(), ?error, "creating error response");
		}

		let error_title = problem_type.title();
		let details = error.to_string();
		let extra = ExtensionMembers::new().tap_mut(|ext| {
			error.add_extension_members(ext);
		});

		Self { problem_type, error: error_title, details, extra }
	}
}

impl IntoResponse for ProblemDetails
{
	fn into_response(self) -> Response
	{
		let status = self.problem_type.status();

		if status == http::StatusCode::NO_CONTENT {
			return status.into_response();
		}

		let headers = [(http::header::CONTENT_TYPE, "application/problem+json")];
		let body = crate::http::extract::Json(self);

		(status, headers, body).into_response()
	}
}

/// Trait implementations for [`utoipa`].
mod utoipa_impls
{
	use std::collections::BTreeMap;

	use itertools::Itertools;
	use utoipa::openapi::response::{Response, ResponseBuilder, ResponsesBuilder};
	use utoipa::openapi::RefOr;
	use utoipa::IntoResponses;

	use super::{ProblemDetails, ProblemType};

	impl IntoResponses for ProblemDetails
	{
		fn responses() -> BTreeMap<String, RefOr<Response>>
		{
			let responses = ProblemType::all()
				.iter()
				.map(|problem| problem.status())
				.unique()
				.map(|status| {
					let description = status.canonical_reason().unwrap_or_default();

					(status.as_str().to_owned(), ResponseBuilder::new().description(description).build())
				})
				.collect_vec();

			ResponsesBuilder::new()
				.responses_from_iter(responses)
				.build()
				.into()
		}
	}
}
