//! HTTP handlers for this service.

use axum::extract::{DefaultBodyLimit, State};
use axum::{routing, Router};

use super::{Error, ImportCoursesResponse, ImportService};
use crate::http::extract::MultipartForm;
use crate::http::ProblemDetails;
use crate::middleware;
use crate::services::auth::AdminSession;

/// The form field holding the spreadsheet.
const FILE_FIELD: &str = "file";

/// Maximum size of an uploaded spreadsheet.
const MAX_FILE_SIZE: usize = 32 * 1024 * 1024;

impl From<ImportService> for Router
{
	fn from(svc: ImportService) -> Self
	{
		Router::new()
			.route("/admin/import/courses", routing::post(import_courses))
			.route_layer(DefaultBodyLimit::max(MAX_FILE_SIZE))
			.route_layer(middleware::cors::dashboard(svc.auth_svc.dashboard_origin(), [
				http::Method::OPTIONS,
				http::Method::POST,
			]))
			.with_state(svc)
	}
}

/// Imports courses from a CSV or XLSX file.
///
/// Rows that cannot be imported are listed in `errors`; rows whose SKU
/// already exists are listed in `skipped`.
#[tracing::instrument(skip(form), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/api/admin/import/courses",
	tag = "Import",
	request_body(content = ImportCoursesForm, content_type = "multipart/form-data"),
	responses(ImportCoursesResponse, ProblemDetails),
	security(("Admin Cookie" = []))
)]
pub(crate) async fn import_courses(
	_session: AdminSession,
	State(svc): State<ImportService>,
	mut form: MultipartForm,
) -> Result<ImportCoursesResponse, ProblemDetails>
{
	let file = form
		.take_file(FILE_FIELD)
		.ok_or(Error::MissingFile { field: FILE_FIELD })?;

	let res = svc.import_courses(file).await?;

	Ok(res)
}

/// The multipart form accepted by `POST /api/admin/import/courses`.
#[derive(utoipa::ToSchema)]
#[doc(hidden)]
#[allow(dead_code)]
pub(crate) struct ImportCoursesForm
{
	/// A `.csv` or `.xlsx` file. The first row holds the column headers.
	#[schema(value_type = String, format = Binary)]
	file: Vec<u8>,
}

#[cfg(test)]
mod tests
{
	use std::sync::Arc;

	use axum::body::Body;
	use http::StatusCode;
	use tower::ServiceExt;

	use super::*;
	use crate::services::import::{ImportPacing, ImportVocabulary};
	use crate::services::AuthService;
	use crate::testing::{self, MemoryCourseStore, MultipartBuilder};

	fn router(store: Arc<MemoryCourseStore>) -> Router
	{
		let pacing = ImportPacing::default();
		let auth_svc = AuthService::new(testing::ADMIN_TOKEN, None);
		let svc = ImportService::new(store, ImportVocabulary::US, pacing, auth_svc);

		Router::from(svc)
	}

	#[tokio::test(start_paused = true)]
	async fn import_csv() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = MultipartBuilder::new()
			.file("file", "courses.csv", "text/csv", b"SKU,Title,States\nA-1,Ethics,CA|NY\nA-2,\n")
			.into_request("/admin/import/courses", Some(testing::ADMIN_TOKEN))?;

		let res = router(store.clone()).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let body = testing::json_body(res).await?;

		testing::assert_eq!(body["imported"], 1);
		testing::assert_eq!(body["courses"][0]["sku"], "A-1");
		testing::assert_eq!(body["errors"][0], "Row 2: Missing or invalid title");
		testing::assert!(body.get("skipped").is_none(), "empty lists are omitted");
		testing::assert_eq!(store.skus(), ["A-1"]);

		Ok(())
	}

	#[tokio::test]
	async fn reject_missing_cookie() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = MultipartBuilder::new()
			.file("file", "courses.csv", "text/csv", b"SKU,Title\nA-1,Ethics\n")
			.into_request("/admin/import/courses", None)?;

		let res = router(store.clone()).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
		testing::assert!(store.skus().is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn reject_wrong_token() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = MultipartBuilder::new()
			.file("file", "courses.csv", "text/csv", b"SKU,Title\nA-1,Ethics\n")
			.into_request("/admin/import/courses", Some("not-the-token"))?;

		let res = router(store).oneshot(req).await?;
		let status = res.status();
		let body = testing::json_body(res).await?;

		testing::assert_eq!(status, StatusCode::UNAUTHORIZED);
		testing::assert!(body.get("error").is_some(), "error body has `error`");
		testing::assert!(body.get("details").is_some(), "error body has `details`");

		Ok(())
	}

	#[tokio::test]
	async fn reject_missing_file() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = MultipartBuilder::new()
			.text("note", "forgot the file")
			.into_request("/admin/import/courses", Some(testing::ADMIN_TOKEN))?;

		let res = router(store).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::BAD_REQUEST);

		Ok(())
	}

	#[tokio::test]
	async fn undecodable_files_are_server_errors() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = MultipartBuilder::new()
			.file("file", "courses.xlsx", "application/octet-stream", b"garbage")
			.into_request("/admin/import/courses", Some(testing::ADMIN_TOKEN))?;

		let res = router(store).oneshot(req).await?;
		let status = res.status();
		let body = testing::json_body(res).await?;

		testing::assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		testing::assert_eq!(body["error"], "failed to import courses");

		Ok(())
	}

	#[tokio::test]
	async fn non_multipart_bodies_are_rejected() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let req = http::Request::post("/admin/import/courses")
			.header(http::header::COOKIE, format!("admin_token={}", testing::ADMIN_TOKEN))
			.body(Body::from("SKU,Title"))?;

		let res = router(store).oneshot(req).await?;

		testing::assert!(res.status().is_client_error(), "got {}", res.status());

		Ok(())
	}
}
