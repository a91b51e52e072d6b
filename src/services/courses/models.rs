//! Request / Response types for this service.

use std::fmt;

use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use cpe::{CourseFormat, CreditType, StateCode};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::CourseDraft;
use crate::http::extract::UploadedFile;

/// An ID uniquely identifying a course.
#[derive(
	Debug,
	Display,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
	sqlx::Type,
	utoipa::ToSchema,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CourseID(pub u32);

/// The price of online delivery when none is given.
pub const DEFAULT_ONLINE_PRICE: f64 = 15.0;

/// A format a course is sold in, and its price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FormatEntry
{
	/// The delivery format.
	pub format: CourseFormat,

	/// The price in USD.
	pub price: f64,
}

/// Credits a course awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreditEntry
{
	/// The regulatory credit type.
	pub credit_type: CreditType,

	/// How many credits are awarded.
	pub amount: f64,

	/// The course number assigned by the regulator.
	///
	/// Empty if unknown.
	pub course_number: String,
}

/// A jurisdiction a course is approved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StateEntry
{
	/// The two-letter postal code.
	#[schema(value_type = String, example = "CA")]
	pub state_code: StateCode,
}

/// A course and all of its related data.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema, utoipa::IntoResponses)]
#[response(status = OK)]
pub struct Course
{
	pub id: CourseID,
	pub sku: String,
	pub title: String,
	pub description: String,
	pub author: String,
	pub main_subject: String,

	/// Public URL of the table-of-contents PDF. Empty if none was uploaded.
	pub table_of_contents_url: String,

	/// Public URL of the course-content PDF. Empty if none was uploaded.
	pub course_content_url: String,

	/// When this course was created.
	pub created_on: DateTime<Utc>,

	pub formats: Vec<FormatEntry>,
	pub credits: Vec<CreditEntry>,
	pub states: Vec<StateEntry>,
}

impl IntoResponse for Course
{
	fn into_response(self) -> Response
	{
		crate::http::extract::Json(self).into_response()
	}
}

/// A course about to be inserted, together with its related rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse
{
	pub draft: CourseDraft,
	pub formats: Vec<FormatEntry>,
	pub credits: Vec<CreditEntry>,
	pub states: Vec<StateEntry>,
}

/// Replacement values for a course's fields.
///
/// `None` leaves a field untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CourseUpdate
{
	pub sku: Option<String>,
	pub title: Option<String>,
	pub description: Option<String>,
	pub author: Option<String>,
	pub main_subject: Option<String>,
	pub table_of_contents_url: Option<String>,
	pub course_content_url: Option<String>,
}

impl CourseUpdate
{
	/// Whether this update would not change anything.
	pub fn is_empty(&self) -> bool
	{
		let Self {
			sku,
			title,
			description,
			author,
			main_subject,
			table_of_contents_url,
			course_content_url,
		} = self;

		[sku, title, description, author, main_subject, table_of_contents_url, course_content_url]
			.into_iter()
			.all(Option::is_none)
	}
}

/// The PDF files attached to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseFileKind
{
	TableOfContents,
	CourseContent,
}

impl CourseFileKind
{
	/// The multipart form field this file is submitted under.
	pub const fn form_field(self) -> &'static str
	{
		match self {
			Self::TableOfContents => "table_of_contents",
			Self::CourseContent => "course_content",
		}
	}

	/// The column the file's URL is stored in.
	pub const fn column(self) -> &'static str
	{
		match self {
			Self::TableOfContents => "table_of_contents_url",
			Self::CourseContent => "course_content_url",
		}
	}
}

impl fmt::Display for CourseFileKind
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(match self {
			Self::TableOfContents => "table of contents",
			Self::CourseContent => "course content",
		})
	}
}

/// Files submitted alongside a course form.
#[derive(Debug, Default)]
pub struct CourseFiles
{
	pub table_of_contents: Option<UploadedFile>,
	pub course_content: Option<UploadedFile>,
}

impl CourseFiles
{
	/// Iterates over the submitted files, table of contents first.
	pub fn into_files(self) -> impl Iterator<Item = (CourseFileKind, UploadedFile)>
	{
		let table_of_contents = self
			.table_of_contents
			.map(|file| (CourseFileKind::TableOfContents, file));

		let course_content = self
			.course_content
			.map(|file| (CourseFileKind::CourseContent, file));

		table_of_contents.into_iter().chain(course_content)
	}
}

/// Request payload for creating a course.
#[derive(Debug)]
pub struct CreateCourseRequest
{
	pub course: NewCourse,
	pub files: CourseFiles,
}

/// Response payload for creating a course.
#[derive(Debug, Serialize, utoipa::ToSchema, utoipa::IntoResponses)]
#[response(status = CREATED)]
pub struct CreateCourseResponse
{
	/// The new course's ID.
	pub course_id: CourseID,

	/// The new course's SKU.
	pub sku: String,

	/// Problems with uploaded files.
	///
	/// The course itself was created regardless.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub warnings: Vec<String>,
}

impl IntoResponse for CreateCourseResponse
{
	fn into_response(self) -> Response
	{
		(http::StatusCode::CREATED, crate::http::extract::Json(self)).into_response()
	}
}

/// Request payload for updating a course.
#[derive(Debug)]
pub struct UpdateCourseRequest
{
	pub course_id: CourseID,
	pub update: CourseUpdate,
	pub files: CourseFiles,
}

/// Response payload for updating a course.
#[derive(Debug, Serialize, utoipa::ToSchema, utoipa::IntoResponses)]
#[response(status = OK)]
pub struct UpdateCourseResponse
{
	/// The updated course's ID.
	pub course_id: CourseID,

	/// Problems with uploaded files.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub warnings: Vec<String>,
}

impl IntoResponse for UpdateCourseResponse
{
	fn into_response(self) -> Response
	{
		crate::http::extract::Json(self).into_response()
	}
}

/// Request payload for fetching potentially many courses.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct FetchCoursesRequest
{
	/// The maximum amount of courses to return.
	#[param(default = 100, maximum = 500)]
	pub limit: Option<u64>,

	/// Pagination offset.
	pub offset: Option<u64>,
}

/// Response payload for fetching potentially many courses.
#[derive(Debug, Serialize, utoipa::ToSchema, utoipa::IntoResponses)]
#[response(status = OK)]
pub struct FetchCoursesResponse
{
	/// The courses on this page, newest first.
	pub courses: Vec<Course>,

	/// How many courses exist in total.
	pub total: u64,
}

impl IntoResponse for FetchCoursesResponse
{
	fn into_response(self) -> Response
	{
		crate::http::extract::Json(self).into_response()
	}
}
