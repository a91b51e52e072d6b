//! Everything related to [OpenAPI].
//!
//! This project uses the [`utoipa`] crate for generating an OpenAPI
//! specification from code. The [`Spec`] struct in this module lists out all
//! the relevant types, routes, and other metadata that will be included in the
//! document served at `/docs/open-api.json`.
//!
//! [OpenAPI]: https://spec.openapis.org/oas/latest.html

use std::sync::Arc;

use axum::{routing, Router};
use itertools::Itertools;
use utoipa::OpenApi;

use crate::http::extract::Json;

mod security;
use security::Security;

/// The path the OpenAPI document is served at.
pub const DOCUMENT_PATH: &str = "/docs/open-api.json";

#[derive(Debug, Clone, OpenApi)]
#[openapi(
  info(
    title = "CPE Marketplace API",
    description = "Course catalogue and bulk import for continuing professional education.",
  ),
  modifiers(&Security),
  paths(
    crate::services::health::http::get,

    crate::services::courses::http::get_many,
    crate::services::courses::http::get_single,
    crate::services::courses::http::create_course,
    crate::services::courses::http::update_course,

    crate::services::import::http::import_courses,

    crate::services::users::http::get_template,
  ),
  components(
    schemas(
      cpe::CourseFormat,
      cpe::CreditType,

      crate::services::health::HealthReport,

      crate::services::courses::CourseID,
      crate::services::courses::Course,
      crate::services::courses::FormatEntry,
      crate::services::courses::CreditEntry,
      crate::services::courses::StateEntry,
      crate::services::courses::CreateCourseResponse,
      crate::services::courses::UpdateCourseResponse,
      crate::services::courses::FetchCoursesResponse,
      crate::services::courses::http::CourseForm,

      crate::services::import::ImportedCourse,
      crate::services::import::ImportCoursesResponse,
      crate::services::import::http::ImportCoursesForm,
    ),
  ),
)]
#[allow(missing_docs)]
pub struct Spec(utoipa::openapi::OpenApi);

impl Spec
{
	/// Creates a new [`Spec`].
	pub fn new() -> Self
	{
		Self(Self::openapi())
	}

	/// Returns an iterator over the registered API routes and their allowed
	/// HTTP methods.
	pub fn routes(&self) -> impl Iterator<Item = (&str, String)>
	{
		self.0.paths.paths.iter().map(|(path, item)| {
			let methods = item
				.operations
				.keys()
				.map(|method| format!("{method:?}").to_uppercase())
				.join(", ");

			(path.as_str(), methods)
		})
	}

	/// Generates a JSON representation of this OpenAPI spec.
	pub fn as_json(&self) -> serde_json::Result<String>
	{
		self.0.to_pretty_json()
	}
}

impl From<Spec> for Router
{
	fn from(spec: Spec) -> Self
	{
		let document = Arc::new(spec.0);

		Router::new().route(
			DOCUMENT_PATH,
			routing::get(move || {
				let document = Arc::clone(&document);
				async move { Json(utoipa::openapi::OpenApi::clone(&document)) }
			}),
		)
	}
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use http::StatusCode;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	#[test]
	fn lists_every_route()
	{
		let spec = Spec::new();
		let routes = spec.routes().collect::<Vec<_>>();

		std::assert!(
			routes.contains(&("/api/admin/import/courses", String::from("POST"))),
			"import route is missing: {routes:?}",
		);
		std::assert!(
			routes.contains(&("/api/courses/{course}", String::from("GET"))),
			"course route is missing: {routes:?}",
		);
	}

	#[tokio::test]
	async fn serves_document() -> color_eyre::Result<()>
	{
		let req = http::Request::get(DOCUMENT_PATH).body(Body::empty())?;
		let res = Router::from(Spec::new()).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let body = testing::json_body(res).await?;

		testing::assert!(body["components"]["securitySchemes"]["Admin Cookie"].is_object());

		Ok(())
	}
}
