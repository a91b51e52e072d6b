//! A service for managing courses.
//!
//! Courses are stored through a [`CourseStore`]. Their PDFs (table of contents
//! and course content) live in object storage and are uploaded through the
//! [`StorageService`]; only the public URLs end up in the store.

use std::fmt;
use std::sync::Arc;

use axum::extract::FromRef;
use cpe::StateTable;
use uuid::Uuid;

use crate::http::extract::UploadedFile;
use crate::services::{AuthService, StorageService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub mod draft;
pub use draft::CourseDraft;

mod store;
pub use store::CourseStore;

mod mysql;
pub use mysql::MySqlCourseStore;

pub(crate) mod models;
pub use models::{
	Course,
	CourseFileKind,
	CourseFiles,
	CourseID,
	CourseUpdate,
	CreateCourseRequest,
	CreateCourseResponse,
	CreditEntry,
	FetchCoursesRequest,
	FetchCoursesResponse,
	FormatEntry,
	NewCourse,
	StateEntry,
	UpdateCourseRequest,
	UpdateCourseResponse,
	DEFAULT_ONLINE_PRICE,
};

/// Default page size for [`CourseService::fetch_courses()`].
const DEFAULT_LIMIT: u64 = 100;

/// Maximum page size for [`CourseService::fetch_courses()`].
const MAX_LIMIT: u64 = 500;

/// A service for managing courses.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct CourseService
{
	store: Arc<dyn CourseStore>,
	storage_svc: StorageService,
	auth_svc: AuthService,
	states: StateTable,
}

impl fmt::Debug for CourseService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("CourseService").finish_non_exhaustive()
	}
}

impl CourseService
{
	/// Create a new [`CourseService`].
	#[tracing::instrument(skip(store))]
	pub fn new(
		store: Arc<dyn CourseStore>,
		storage_svc: StorageService,
		auth_svc: AuthService,
		states: StateTable,
	) -> Self
	{
		Self { store, storage_svc, auth_svc, states }
	}

	/// Fetches a single course.
	///
	/// This will return `Ok(None)` if the course was not found, but everything
	/// else went fine.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_course(&self, course_id: CourseID) -> Result<Option<Course>>
	{
		self.store.fetch_course(course_id).await
	}

	/// Fetches potentially many courses.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_courses(&self, req: FetchCoursesRequest) -> Result<FetchCoursesResponse>
	{
		let limit = req.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
		let offset = req.offset.unwrap_or_default();
		let (courses, total) = self.store.fetch_courses(limit, offset).await?;

		Ok(FetchCoursesResponse { courses, total })
	}

	/// Creates a new course and uploads its files.
	///
	/// File problems do not fail the request; they are reported as warnings
	/// in the response.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn create_course(&self, req: CreateCourseRequest) -> Result<CreateCourseResponse>
	{
		let CreateCourseRequest { mut course, files } = req;

		course.draft = course.draft.truncated();

		if course.draft.sku.trim().is_empty() {
			return Err(Error::MissingField { field: "sku" });
		}

		if course.draft.title.trim().is_empty() {
			return Err(Error::MissingField { field: "title" });
		}

		if self.store.sku_exists(&course.draft.sku).await? {
			return Err(Error::SkuAlreadyExists { sku: course.draft.sku });
		}

		let sku = course.draft.sku.clone();
		let course_id = self.store.create_course(course).await?;

		tracing::info!(target: "cpe_api::audit_log", %course_id, %sku, "created course");

		let warnings = self.attach_files(course_id, files).await;

		Ok(CreateCourseResponse { course_id, sku, warnings })
	}

	/// Updates an existing course and uploads any new files.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn update_course(&self, req: UpdateCourseRequest) -> Result<UpdateCourseResponse>
	{
		let UpdateCourseRequest { course_id, update, files } = req;
		let update = truncate_update(update);

		if update.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
			return Err(Error::InvalidField {
				field: "title",
				reason: String::from("title cannot be empty"),
			});
		}

		if !self.store.update_course(course_id, update).await? {
			return Err(Error::CourseDoesNotExist);
		}

		tracing::info!(target: "cpe_api::audit_log", %course_id, "updated course");

		let warnings = self.attach_files(course_id, files).await;

		Ok(UpdateCourseResponse { course_id, warnings })
	}

	/// Uploads every submitted file, one after another.
	///
	/// A failing file does not stop the others; its error is returned as a
	/// warning instead.
	async fn attach_files(&self, course_id: CourseID, files: CourseFiles) -> Vec<String>
	{
		let mut warnings = Vec::new();

		for (kind, file) in files.into_files() {
			match self.attach_file(course_id, kind, file).await {
				Ok(url) => {
					tracing::info!(%course_id, %kind, %url, "attached file");
				}
				Err(error) => {
					tracing::warn!(%course_id, %kind, %error, "failed to attach file");
					warnings.push(format!("Failed to upload {kind}: {error}"));
				}
			}
		}

		warnings
	}

	/// Uploads a single file, verifies it is reachable, and stores its URL.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn attach_file(
		&self,
		course_id: CourseID,
		kind: CourseFileKind,
		file: UploadedFile,
	) -> Result<String>
	{
		if !is_pdf(&file) {
			return Err(Error::NotAPdf { kind });
		}

		let slug = kind.form_field().replace('_', "-");
		let path = format!("courses/{course_id}/{slug}-{}.pdf", Uuid::new_v4().simple());
		let url = self.storage_svc.store_pdf(&path, file.bytes).await?;

		if url.as_str().chars().count() > draft::limits::URL {
			return Err(Error::UrlTooLong { kind });
		}

		self.store
			.set_course_file(course_id, kind, url.as_str())
			.await?;

		Ok(url.into())
	}
}

/// Whether an upload looks like a PDF.
fn is_pdf(file: &UploadedFile) -> bool
{
	file.extension().as_deref() == Some("pdf")
		|| file.content_type.as_deref() == Some(mime::APPLICATION_PDF.as_ref())
}

/// Applies the same length limits as [`CourseDraft::truncated()`].
fn truncate_update(update: CourseUpdate) -> CourseUpdate
{
	use draft::{limits, truncate};

	let cap = |value: Option<String>, max: usize| value.map(|value| truncate(&value, max));

	CourseUpdate {
		sku: cap(update.sku, limits::SKU),
		title: cap(update.title, limits::TITLE),
		description: cap(update.description, limits::DESCRIPTION),
		author: cap(update.author, limits::AUTHOR),
		main_subject: cap(update.main_subject, limits::MAIN_SUBJECT),
		table_of_contents_url: cap(update.table_of_contents_url, limits::URL),
		course_content_url: cap(update.course_content_url, limits::URL),
	}
}
