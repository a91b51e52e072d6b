//! This module contains helpers for unit/integration tests.

use std::sync::Mutex;

use axum::async_trait;
use axum::body::{Body, Bytes};
use axum::response::Response;
use chrono::{DateTime, Utc};
use url::Url;

use crate::services::courses::{
	self,
	Course,
	CourseFileKind,
	CourseID,
	CourseStore,
	CourseUpdate,
	NewCourse,
};
use crate::services::auth::COOKIE_NAME;
use crate::services::storage::{self, FileStore, StorageObject};

/// The admin token used by tests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr, $($msg:tt)+) => {
		match (&$lhs, &$rhs) {
			(lhs, rhs) => {
				::color_eyre::eyre::ensure!(lhs == rhs, $($msg)+);
			}
		}
	};
	($lhs:expr, $rhs:expr $(,)?) => {
		match (&$lhs, &$rhs) {
			(lhs, rhs) => {
				if lhs != rhs {
					::color_eyre::eyre::bail!(
						"assertion `{} == {}` failed\n  lhs: {:?}\n  rhs: {:?}",
						stringify!($lhs),
						stringify!($rhs),
						lhs,
						rhs,
					);
				}
			}
		}
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)? $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!(matches!($expr, $pat $(if $cond)?) $(, $($msg)*)?)
	};
}

pub(crate) use {assert, assert_eq, assert_matches};

/// A [`CourseStore`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryCourseStore
{
	courses: Mutex<Vec<StoredCourse>>,

	/// Creating a course with this SKU fails with a database error.
	failing_sku: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredCourse
{
	id: CourseID,
	course: NewCourse,
	created_on: DateTime<Utc>,
}

impl StoredCourse
{
	fn to_course(&self) -> Course
	{
		let draft = self.course.draft.clone();

		Course {
			id: self.id,
			sku: draft.sku,
			title: draft.title,
			description: draft.description,
			author: draft.author,
			main_subject: draft.main_subject,
			table_of_contents_url: draft.table_of_contents_url,
			course_content_url: draft.course_content_url,
			created_on: self.created_on,
			formats: self.course.formats.clone(),
			credits: self.course.credits.clone(),
			states: self.course.states.clone(),
		}
	}
}

impl MemoryCourseStore
{
	/// A store that fails to create the course with the given SKU.
	pub fn failing_for(sku: &str) -> Self
	{
		Self { failing_sku: Some(sku.to_owned()), ..Default::default() }
	}

	/// Inserts a bare course with the given SKU.
	pub fn insert_sku(&self, sku: &str)
	{
		let mut rows = self.courses.lock().unwrap();
		let id = next_id(&rows);

		rows.push(StoredCourse {
			id,
			course: NewCourse {
				draft: courses::CourseDraft {
					sku: sku.to_owned(),
					title: format!("Existing {sku}"),
					..Default::default()
				},
				formats: Vec::new(),
				credits: Vec::new(),
				states: Vec::new(),
			},
			created_on: Utc::now(),
		});
	}

	/// The SKUs of all stored courses, in insertion order.
	pub fn skus(&self) -> Vec<String>
	{
		self.courses
			.lock()
			.unwrap()
			.iter()
			.map(|stored| stored.course.draft.sku.clone())
			.collect()
	}

	/// The stored course with the given SKU.
	pub fn course(&self, sku: &str) -> Option<NewCourse>
	{
		self.courses
			.lock()
			.unwrap()
			.iter()
			.find(|stored| stored.course.draft.sku == sku)
			.map(|stored| stored.course.clone())
	}
}

fn next_id(courses: &[StoredCourse]) -> CourseID
{
	CourseID(courses.iter().map(|stored| stored.id.0).max().unwrap_or(0) + 1)
}

#[async_trait]
impl CourseStore for MemoryCourseStore
{
	async fn sku_exists(&self, sku: &str) -> courses::Result<bool>
	{
		Ok(self.course(sku).is_some())
	}

	async fn create_course(&self, course: NewCourse) -> courses::Result<CourseID>
	{
		if self.failing_sku.as_deref() == Some(course.draft.sku.as_str()) {
			return Err(courses::Error::Database(sqlx::Error::PoolTimedOut));
		}

		let mut rows = self.courses.lock().unwrap();

		if rows.iter().any(|stored| stored.course.draft.sku == course.draft.sku) {
			return Err(courses::Error::SkuAlreadyExists { sku: course.draft.sku });
		}

		let id = next_id(&rows);

		rows.push(StoredCourse { id, course, created_on: Utc::now() });

		Ok(id)
	}

	async fn fetch_course(&self, course_id: CourseID) -> courses::Result<Option<Course>>
	{
		Ok(self
			.courses
			.lock()
			.unwrap()
			.iter()
			.find(|stored| stored.id == course_id)
			.map(StoredCourse::to_course))
	}

	async fn fetch_courses(&self, limit: u64, offset: u64) -> courses::Result<(Vec<Course>, u64)>
	{
		let rows = self.courses.lock().unwrap();
		let page = rows
			.iter()
			.rev()
			.skip(usize::try_from(offset).unwrap())
			.take(usize::try_from(limit).unwrap())
			.map(StoredCourse::to_course)
			.collect();

		Ok((page, u64::try_from(rows.len()).unwrap()))
	}

	async fn update_course(&self, course_id: CourseID, update: CourseUpdate)
	-> courses::Result<bool>
	{
		let mut rows = self.courses.lock().unwrap();

		if let Some(sku) = &update.sku {
			if rows
				.iter()
				.any(|stored| stored.id != course_id && &stored.course.draft.sku == sku)
			{
				return Err(courses::Error::SkuAlreadyExists { sku: sku.clone() });
			}
		}

		let Some(stored) = rows.iter_mut().find(|stored| stored.id == course_id) else {
			return Ok(false);
		};

		let draft = &mut stored.course.draft;
		let fields = [
			(&mut draft.sku, update.sku),
			(&mut draft.title, update.title),
			(&mut draft.description, update.description),
			(&mut draft.author, update.author),
			(&mut draft.main_subject, update.main_subject),
			(&mut draft.table_of_contents_url, update.table_of_contents_url),
			(&mut draft.course_content_url, update.course_content_url),
		];

		for (field, value) in fields {
			if let Some(value) = value {
				*field = value;
			}
		}

		Ok(true)
	}

	async fn set_course_file(
		&self,
		course_id: CourseID,
		kind: CourseFileKind,
		url: &str,
	) -> courses::Result<()>
	{
		let mut rows = self.courses.lock().unwrap();

		if let Some(stored) = rows.iter_mut().find(|stored| stored.id == course_id) {
			let draft = &mut stored.course.draft;

			match kind {
				CourseFileKind::TableOfContents => draft.table_of_contents_url = url.to_owned(),
				CourseFileKind::CourseContent => draft.course_content_url = url.to_owned(),
			}
		}

		Ok(())
	}
}

/// A [`FileStore`] that remembers what was uploaded.
///
/// Public URLs look like `https://storage.test/public/{bucket}/{path}`.
#[derive(Debug, Default)]
pub struct MemoryFileStore
{
	uploads: Mutex<Vec<String>>,

	/// Uploaded files can not be fetched afterwards.
	unreachable: bool,
}

impl MemoryFileStore
{
	/// A store whose uploads never become reachable.
	pub fn unreachable() -> Self
	{
		Self { unreachable: true, ..Default::default() }
	}

	/// `{bucket}/{path}` of every upload, in order.
	pub fn uploaded_paths(&self) -> Vec<String>
	{
		self.uploads.lock().unwrap().clone()
	}
}

#[async_trait]
impl FileStore for MemoryFileStore
{
	async fn upload(&self, object: StorageObject<'_>) -> storage::Result<Url>
	{
		let key = format!("{}/{}", object.bucket, object.path);
		let url = Url::parse(&format!("https://storage.test/public/{key}"))?;

		self.uploads.lock().unwrap().push(key);

		Ok(url)
	}

	async fn verify(&self, url: &Url) -> storage::Result<()>
	{
		if self.unreachable {
			return Err(storage::Error::Unreachable {
				url: url.clone(),
				status: http::StatusCode::NOT_FOUND,
			});
		}

		Ok(())
	}
}

/// Builds `multipart/form-data` requests.
#[derive(Debug, Default)]
pub struct MultipartBuilder
{
	body: Vec<u8>,
}

impl MultipartBuilder
{
	const BOUNDARY: &'static str = "----cpe-test-boundary";

	pub fn new() -> Self
	{
		Self::default()
	}

	/// Adds a text field.
	pub fn text(mut self, name: &str, value: &str) -> Self
	{
		self.body.extend_from_slice(
			format!(
				"--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
				Self::BOUNDARY,
			)
			.as_bytes(),
		);

		self
	}

	/// Adds a file field.
	pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self
	{
		self.body.extend_from_slice(
			format!(
				"--{}\r\nContent-Disposition: form-data; name=\"{name}\"; \
				 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
				Self::BOUNDARY,
			)
			.as_bytes(),
		);
		self.body.extend_from_slice(bytes);
		self.body.extend_from_slice(b"\r\n");

		self
	}

	/// Finishes the body and wraps it in a `POST` request.
	///
	/// The admin cookie is set if `admin_token` is given.
	pub fn into_request(self, uri: &str, admin_token: Option<&str>)
	-> color_eyre::Result<http::Request<Body>>
	{
		self.into_request_with(http::Method::POST, uri, admin_token)
	}

	/// Like [`MultipartBuilder::into_request()`], but with a custom method.
	pub fn into_request_with(
		mut self,
		method: http::Method,
		uri: &str,
		admin_token: Option<&str>,
	) -> color_eyre::Result<http::Request<Body>>
	{
		self.body
			.extend_from_slice(format!("--{}--\r\n", Self::BOUNDARY).as_bytes());

		let mut req = http::Request::builder()
			.method(method)
			.uri(uri)
			.header(
				http::header::CONTENT_TYPE,
				format!("multipart/form-data; boundary={}", Self::BOUNDARY),
			);

		if let Some(token) = admin_token {
			req = req.header(http::header::COOKIE, format!("{COOKIE_NAME}={token}"));
		}

		Ok(req.body(Body::from(self.body))?)
	}
}

/// Reads a response body.
pub async fn body_bytes(res: Response) -> color_eyre::Result<Bytes>
{
	Ok(axum::body::to_bytes(res.into_body(), usize::MAX).await?)
}

/// Reads a response body as text.
pub async fn text_body(res: Response) -> color_eyre::Result<String>
{
	Ok(String::from_utf8(body_bytes(res).await?.to_vec())?)
}

/// Reads a response body as JSON.
pub async fn json_body(res: Response) -> color_eyre::Result<serde_json::Value>
{
	Ok(serde_json::from_slice(&body_bytes(res).await?)?)
}
