//! A service for bulk-importing courses from spreadsheets.
//!
//! An import goes through these steps:
//!
//! 1. The uploaded file is decoded into [`ImportRow`]s. If that fails, the
//!    whole import fails and nothing is created.
//! 2. Rows are processed in batches of [`ImportPacing::batch_size`], strictly
//!    one after another. Every row either creates a course, is skipped because
//!    its SKU already exists, or is reported as an error. No row can abort the
//!    import.
//! 3. The import pauses after every created course and between batches, so
//!    large files do not overwhelm the database.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use chrono::Utc;

use crate::http::extract::UploadedFile;
use crate::services::courses::{self, CourseDraft, CourseStore, NewCourse};
use crate::services::AuthService;
use vocabulary::FieldAliases;

pub(crate) mod http;

mod error;
pub use error::{Error, Result};
use error::RowError;

pub(crate) mod models;
pub use models::{ImportCoursesResponse, ImportedCourse};

pub mod spreadsheet;
pub use spreadsheet::{ImportRow, SpreadsheetFormat};

pub mod vocabulary;
pub use vocabulary::ImportVocabulary;

pub mod resolver;
pub mod states;
pub mod offerings;

/// How fast an import is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportPacing
{
	/// How many rows make up a batch.
	pub batch_size: usize,

	/// Pause after every created course.
	pub row_delay: Duration,

	/// Pause between two batches.
	pub batch_delay: Duration,
}

impl Default for ImportPacing
{
	fn default() -> Self
	{
		Self {
			batch_size: 5,
			row_delay: Duration::from_millis(500),
			batch_delay: Duration::from_millis(1500),
		}
	}
}

/// A service for bulk-importing courses.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct ImportService
{
	store: Arc<dyn CourseStore>,
	vocabulary: ImportVocabulary,
	pacing: ImportPacing,
	auth_svc: AuthService,
}

impl fmt::Debug for ImportService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("ImportService")
			.field("pacing", &self.pacing)
			.finish_non_exhaustive()
	}
}

/// What happened to a single row.
#[derive(Debug)]
enum RowOutcome
{
	/// A course was created.
	Imported(ImportedCourse),

	/// A course with this SKU already exists.
	Skipped
	{
		/// The SKU that already exists.
		sku: String,
	},
}

impl ImportService
{
	/// Create a new [`ImportService`].
	#[tracing::instrument(skip(store))]
	pub fn new(
		store: Arc<dyn CourseStore>,
		vocabulary: ImportVocabulary,
		pacing: ImportPacing,
		auth_svc: AuthService,
	) -> Self
	{
		Self { store, vocabulary, pacing, auth_svc }
	}

	/// Imports every course in an uploaded spreadsheet.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn import_courses(&self, file: UploadedFile) -> Result<ImportCoursesResponse>
	{
		let format = SpreadsheetFormat::from_extension(file.extension().as_deref());

		tracing::debug!(?format, "reading file");

		let rows = spreadsheet::read_rows(&file.bytes, format)?;

		Ok(self.import_rows(rows).await)
	}

	/// Imports already decoded rows.
	#[tracing::instrument(level = "debug", skip_all, fields(rows = rows.len()))]
	pub async fn import_rows(&self, rows: Vec<ImportRow>) -> ImportCoursesResponse
	{
		let batch_size = self.pacing.batch_size.max(1);
		let batch_count = rows.len().div_ceil(batch_size);
		let mut res = ImportCoursesResponse::default();

		for (batch_idx, batch) in rows.chunks(batch_size).enumerate() {
			tracing::debug!(batch = batch_idx + 1, of = batch_count, "processing batch");

			self.process_batch(batch, batch_idx * batch_size + 1, &mut res)
				.await;

			res.batches += 1;

			if res.batches < batch_count {
				tokio::time::sleep(self.pacing.batch_delay).await;
			}
		}

		tracing::info! {
			target: "cpe_api::audit_log",
			imported = res.imported,
			errors = res.errors.len(),
			skipped = res.skipped.len(),
			"finished course import",
		};

		res
	}

	/// Processes the rows of one batch, in order.
	///
	/// `first_row` is the 1-based number of the batch's first row.
	async fn process_batch(
		&self,
		batch: &[ImportRow],
		first_row: usize,
		res: &mut ImportCoursesResponse,
	)
	{
		for (row_number, row) in (first_row..).zip(batch) {
			match self.import_row(row, row_number).await {
				Ok(RowOutcome::Imported(course)) => {
					res.imported += 1;
					res.courses.push(course);

					tokio::time::sleep(self.pacing.row_delay).await;
				}
				Ok(RowOutcome::Skipped { sku }) => {
					tracing::debug!(row = row_number, %sku, "skipping existing course");
					res.skipped.push(sku);
				}
				Err(error) => {
					tracing::warn!(row = row_number, %error, "failed to import row");
					res.errors.push(format!("Row {row_number}: {error}"));
				}
			}
		}
	}

	/// Creates the course described by a single row.
	#[tracing::instrument(level = "trace", skip(self, row), err(Debug, level = "debug"))]
	async fn import_row(
		&self,
		row: &ImportRow,
		row_number: usize,
	) -> Result<RowOutcome, RowError>
	{
		let fields = &self.vocabulary.fields;
		let text = |aliases: &FieldAliases| {
			resolver::resolve(row, aliases)
				.unwrap_or_default()
				.to_owned()
		};

		let title = resolver::resolve(row, &fields.title).ok_or(RowError::MissingTitle)?;
		let sku = resolver::resolve(row, &fields.sku)
			.map_or_else(|| synthetic_sku(row_number), ToOwned::to_owned);

		let draft = CourseDraft {
			sku,
			title: title.to_owned(),
			description: text(&fields.description),
			author: text(&fields.author),
			main_subject: text(&fields.main_subject),
			table_of_contents_url: text(&fields.table_of_contents_url),
			course_content_url: text(&fields.course_content_url),
		}
		.truncated();

		if self.store.sku_exists(&draft.sku).await? {
			return Ok(RowOutcome::Skipped { sku: draft.sku });
		}

		let formats = offerings::extract_formats(row, &self.vocabulary);
		let credits = offerings::extract_credits(row, &self.vocabulary);
		let states = resolver::resolve(row, &fields.states)
			.map(|raw| states::extract_states(raw, &self.vocabulary.states))
			.unwrap_or_default();

		let imported = ImportedCourse { sku: draft.sku.clone(), title: draft.title.clone() };

		match self
			.store
			.create_course(NewCourse { draft, formats, credits, states })
			.await
		{
			Ok(course_id) => {
				tracing::trace!(%course_id, sku = %imported.sku, "imported course");
				Ok(RowOutcome::Imported(imported))
			}
			Err(courses::Error::SkuAlreadyExists { sku }) => Ok(RowOutcome::Skipped { sku }),
			Err(error) => Err(error.into()),
		}
	}
}

/// Generates a SKU for a row that does not have one.
fn synthetic_sku(row_number: usize) -> String
{
	format!("IMP-{}-{row_number}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests
{
	use std::sync::Arc;

	use axum::body::Bytes;
	use tokio::time::Instant;

	use super::*;
	use crate::services::courses::draft::limits;
	use crate::testing::{self, MemoryCourseStore};

	fn service(store: Arc<MemoryCourseStore>) -> ImportService
	{
		ImportService::new(
			store,
			ImportVocabulary::US,
			ImportPacing::default(),
			AuthService::new("token", None),
		)
	}

	fn course_row(sku: &str, title: &str) -> ImportRow
	{
		ImportRow::new([("SKU", sku), ("Title", title), ("Online Price", "25")])
	}

	#[tokio::test(start_paused = true)]
	async fn rows_without_title_are_errors() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let res = service(store.clone())
			.import_rows(vec![course_row("A-1", ""), course_row("A-2", "Ethics")])
			.await;

		testing::assert_eq!(res.imported, 1);
		testing::assert_eq!(res.errors, ["Row 1: Missing or invalid title"]);
		testing::assert_eq!(store.skus(), ["A-2"]);

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn existing_skus_are_skipped() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let svc = service(store.clone());

		let first = svc.import_rows(vec![course_row("A-1", "Ethics")]).await;
		let second = svc.import_rows(vec![course_row("A-1", "Ethics")]).await;

		testing::assert_eq!(first.imported, 1);
		testing::assert_eq!(second.imported, 0);
		testing::assert!(second.courses.is_empty());
		testing::assert!(second.errors.is_empty());
		testing::assert_eq!(second.skipped, ["A-1"]);
		testing::assert_eq!(store.skus().len(), 1);

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn twelve_rows_make_three_batches() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		store.insert_sku("ROW-3");

		let mut rows = (1..=12)
			.map(|n| course_row(&format!("ROW-{n}"), &format!("Course {n}")))
			.collect::<Vec<_>>();

		rows[6] = course_row("ROW-7", "");

		let started = Instant::now();
		let res = service(store).import_rows(rows).await;
		let elapsed = started.elapsed();

		testing::assert_eq!(res.batches, 3);
		testing::assert_eq!(res.imported, 10);
		testing::assert_eq!(res.errors, ["Row 7: Missing or invalid title"]);
		testing::assert_eq!(res.skipped, ["ROW-3"]);
		testing::assert_eq!(res.rows_processed(), 12);

		// 10 created courses and 2 pauses between batches
		let expected = Duration::from_millis(10 * 500 + 2 * 1500);

		testing::assert!(elapsed >= expected, "finished too early: {elapsed:?}");
		testing::assert!(elapsed < expected + Duration::from_millis(50), "took {elapsed:?}");

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn missing_skus_are_generated() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let res = service(store)
			.import_rows(vec![ImportRow::new([("Title", "Ethics")])])
			.await;

		let sku = &res.courses[0].sku;

		testing::assert!(sku.starts_with("IMP-"), "unexpected sku `{sku}`");
		testing::assert!(sku.ends_with("-1"), "unexpected sku `{sku}`");

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn store_failures_do_not_abort_the_import() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::failing_for("A-1"));
		let res = service(store)
			.import_rows(vec![course_row("A-1", "Ethics"), course_row("A-2", "Tax")])
			.await;

		testing::assert_eq!(res.imported, 1);
		testing::assert_eq!(res.errors.len(), 1);
		testing::assert!(res.errors[0].starts_with("Row 1: "), "{:?}", res.errors);

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn rows_are_fully_mapped() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let long_title = "x".repeat(400);
		let row = ImportRow::new([
			("sku", "TAX-1"),
			("Course Title", long_title.as_str()),
			("Course Description", "Everything about taxes."),
			("Author(s)", "J. Doe"),
			("Approved States", "All|CA|ny|Texas"),
			("CPA Credits", "4"),
			("CPA Course Number", "CPA-99"),
			("Video Price", "40"),
		]);

		let res = service(store.clone()).import_rows(vec![row]).await;
		let course = store.course("TAX-1").ok_or_else(|| color_eyre::eyre::eyre!("not created"))?;

		testing::assert_eq!(res.imported, 1);
		testing::assert_eq!(course.draft.title.chars().count(), limits::TITLE);
		testing::assert_eq!(course.draft.description, "Everything about taxes.");
		testing::assert_eq!(course.draft.author, "J. Doe");
		testing::assert_eq!(course.states.len(), 3);
		testing::assert_eq!(course.credits.len(), 1);
		testing::assert_eq!(course.formats.len(), 2);

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn csv_uploads_are_imported() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let file = UploadedFile {
			file_name: Some(String::from("courses.CSV")),
			content_type: Some(String::from("text/csv")),
			bytes: Bytes::from_static(b"SKU,Title\nA-1,Ethics\nA-2,Tax\n"),
		};

		let res = service(store).import_courses(file).await?;

		testing::assert_eq!(res.imported, 2);

		Ok(())
	}

	#[tokio::test(start_paused = true)]
	async fn separator_only_lines_are_row_errors() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let file = UploadedFile {
			file_name: Some(String::from("courses.csv")),
			content_type: Some(String::from("text/csv")),
			bytes: Bytes::from_static(b"SKU,Title\nA-1,Ethics\n,\nA-3,\n"),
		};

		let res = service(store).import_courses(file).await?;

		testing::assert_eq!(res.imported, 1);
		testing::assert_eq!(res.errors, [
			"Row 2: Missing or invalid title",
			"Row 3: Missing or invalid title",
		]);
		testing::assert_eq!(res.rows_processed(), 3);

		Ok(())
	}

	#[tokio::test]
	async fn undecodable_workbooks_abort_the_import() -> color_eyre::Result<()>
	{
		let store = Arc::new(MemoryCourseStore::default());
		let file = UploadedFile {
			file_name: Some(String::from("courses.xlsx")),
			content_type: None,
			bytes: Bytes::from_static(b"not a workbook"),
		};

		let res = service(store.clone()).import_courses(file).await;

		testing::assert_matches!(res, Err(Error::UnreadableSpreadsheet(_)));
		testing::assert!(store.skus().is_empty());

		Ok(())
	}
}
