//! Request / Response types for this service.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A course that was created by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ImportedCourse
{
	/// The course's SKU.
	pub sku: String,

	/// The course's title.
	pub title: String,
}

/// Response payload for importing courses.
#[derive(Debug, Default, Serialize, utoipa::ToSchema, utoipa::IntoResponses)]
#[response(status = OK)]
#[schema(example = json!({
  "imported": 2,
  "courses": [
    { "sku": "ETH-101", "title": "Ethics for CPAs" },
    { "sku": "TAX-200", "title": "Individual Tax Update" }
  ],
  "errors": ["Row 3: Missing or invalid title"],
  "skipped": ["ETH-100"]
}))]
pub struct ImportCoursesResponse
{
	/// How many courses were created.
	pub imported: usize,

	/// The courses that were created, in file order.
	pub courses: Vec<ImportedCourse>,

	/// Rows that could not be imported, as `Row N: <reason>`.
	///
	/// `N` counts data rows, starting at 1.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,

	/// SKUs of rows that were skipped because the course already exists.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub skipped: Vec<String>,

	/// How many batches the rows were processed in.
	#[serde(skip)]
	pub batches: usize,
}

impl ImportCoursesResponse
{
	/// How many rows were looked at in total.
	pub fn rows_processed(&self) -> usize
	{
		self.imported + self.errors.len() + self.skipped.len()
	}
}

impl IntoResponse for ImportCoursesResponse
{
	fn into_response(self) -> Response
	{
		crate::http::extract::Json(self).into_response()
	}
}
