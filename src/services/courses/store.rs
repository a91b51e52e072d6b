//! The [`CourseStore`] trait.

use axum::async_trait;

use super::{Course, CourseFileKind, CourseID, CourseUpdate, NewCourse, Result};

/// Persistent storage for courses and their related rows.
///
/// The production implementation is [`MySqlCourseStore`].
///
/// [`MySqlCourseStore`]: super::MySqlCourseStore
#[async_trait]
pub trait CourseStore: Send + Sync + 'static
{
	/// Checks whether a course with the given SKU exists.
	async fn sku_exists(&self, sku: &str) -> Result<bool>;

	/// Inserts a course together with its formats, credits and states.
	///
	/// Either everything is inserted, or nothing is. Returns
	/// [`Error::SkuAlreadyExists`] if the SKU is taken.
	///
	/// [`Error::SkuAlreadyExists`]: super::Error::SkuAlreadyExists
	async fn create_course(&self, course: NewCourse) -> Result<CourseID>;

	/// Fetches a single course.
	async fn fetch_course(&self, course_id: CourseID) -> Result<Option<Course>>;

	/// Fetches a page of courses, newest first, and the total amount of
	/// courses.
	async fn fetch_courses(&self, limit: u64, offset: u64) -> Result<(Vec<Course>, u64)>;

	/// Applies an update to a course.
	///
	/// Returns `false` if the course does not exist.
	async fn update_course(&self, course_id: CourseID, update: CourseUpdate) -> Result<bool>;

	/// Stores the public URL of one of a course's files.
	async fn set_course_file(&self, course_id: CourseID, kind: CourseFileKind, url: &str)
	-> Result<()>;
}
