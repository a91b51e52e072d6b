//! Extractors for data encoded in the request URI.
//!
//! [`Path`] and [`Query`] wrap the [`axum`] extractors of the same name; both
//! reject with a [`UriRejection`] so a malformed course ID and a malformed
//! page size produce the same kind of error response.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::path::ErrorKind;
	pub use axum::extract::rejection::{PathRejection, QueryRejection};
	pub use axum::extract::{Path, Query};
}

/// An extractor for URI segment captures, like `/courses/:course`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Path), rejection(UriRejection))]
pub struct Path<T>(pub T);

/// An extractor for URI query parameters, like `?limit=10`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Query), rejection(UriRejection))]
pub struct Query<T>(pub T);

/// Rejection for the [`Path`] and [`Query`] extractors.
#[derive(Debug, Error)]
pub enum UriRejection
{
	/// The path segments did not match the expected types.
	#[error(transparent)]
	Path(#[from] base::PathRejection),

	/// The query string could not be deserialized.
	#[error(transparent)]
	Query(#[from] base::QueryRejection),
}

impl IntoResponse for UriRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for UriRejection
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::Path(_) => ProblemType::InvalidPathParameters,
			Self::Query(_) => ProblemType::InvalidQueryString,
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		let source = match self {
			Self::Path(base::PathRejection::FailedToDeserializePathParams(source)) => source,
			Self::Path(_) => return,
			Self::Query(rejection) => {
				ext.add("reason", &rejection.body_text());
				return;
			}
		};

		if let base::ErrorKind::ParseErrorAtKey { key, value, expected_type } = source.kind() {
			ext.add("parameter", key);
			ext.add("value", value);
			ext.add("expected_type", expected_type);
		} else if let base::ErrorKind::ParseError { value, expected_type } = source.kind() {
			ext.add("value", value);
			ext.add("expected_type", expected_type);
		}
	}
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::routing;
	use axum::Router;
	use http::StatusCode;
	use serde::Deserialize;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	#[derive(Debug, Deserialize)]
	struct Page
	{
		limit: Option<u64>,
	}

	fn router() -> Router
	{
		Router::new()
			.route("/courses/:course", routing::get(|Path(id): Path<u32>| async move { id.to_string() }))
			.route(
				"/courses",
				routing::get(|Query(page): Query<Page>| async move { format!("{:?}", page.limit) }),
			)
	}

	#[tokio::test]
	async fn bad_path_parameters() -> color_eyre::Result<()>
	{
		let req = http::Request::get("/courses/abc").body(Body::empty())?;
		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let body = testing::json_body(res).await?;

		testing::assert_eq!(body["error"], "invalid path parameters");
		testing::assert_eq!(body["value"], "abc");

		Ok(())
	}

	#[tokio::test]
	async fn bad_query_string() -> color_eyre::Result<()>
	{
		let req = http::Request::get("/courses?limit=-1").body(Body::empty())?;
		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let body = testing::json_body(res).await?;

		testing::assert_eq!(body["error"], "invalid query string");
		testing::assert!(body["reason"].is_string());

		Ok(())
	}
}
