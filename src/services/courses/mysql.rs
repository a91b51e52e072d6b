//! [`CourseStore`] implementation on top of MySQL.

use std::collections::HashMap;
use std::fmt;

use axum::async_trait;
use chrono::{DateTime, Utc};
use cpe::{CourseFormat, CreditType, StateCode};
use sqlx::{MySql, Pool, QueryBuilder};

use super::{
	Course,
	CourseFileKind,
	CourseID,
	CourseStore,
	CourseUpdate,
	CreditEntry,
	Error,
	FormatEntry,
	NewCourse,
	Result,
	StateEntry,
};
use crate::database::{SqlErrorExt, TransactionExt};

/// A [`CourseStore`] backed by a MySQL database.
#[derive(Clone)]
pub struct MySqlCourseStore
{
	database: Pool<MySql>,
}

impl fmt::Debug for MySqlCourseStore
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("MySqlCourseStore").finish_non_exhaustive()
	}
}

impl MySqlCourseStore
{
	/// Create a new [`MySqlCourseStore`].
	#[tracing::instrument(skip_all)]
	pub fn new(database: Pool<MySql>) -> Self
	{
		Self { database }
	}

	/// Fetches the formats, credits and states of the given course rows and
	/// assembles full [`Course`]s, preserving the order of `rows`.
	async fn hydrate(&self, rows: Vec<CourseRow>) -> Result<Vec<Course>>
	{
		if rows.is_empty() {
			return Ok(Vec::new());
		}

		let course_ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();

		let mut formats = HashMap::<CourseID, Vec<FormatEntry>>::new();
		let mut credits = HashMap::<CourseID, Vec<CreditEntry>>::new();
		let mut states = HashMap::<CourseID, Vec<StateEntry>>::new();

		let format_rows = select_related(
			"SELECT course_id, format, price FROM CourseFormats",
			&course_ids,
			"format",
		)
		.build_query_as::<(CourseID, String, f64)>()
		.fetch_all(&self.database)
		.await?;

		for (course_id, format, price) in format_rows {
			let format = format.parse::<CourseFormat>()?;
			formats
				.entry(course_id)
				.or_default()
				.push(FormatEntry { format, price });
		}

		let credit_rows = select_related(
			"SELECT course_id, credit_type, amount, course_number FROM CourseCredits",
			&course_ids,
			"credit_type",
		)
		.build_query_as::<(CourseID, String, f64, String)>()
		.fetch_all(&self.database)
		.await?;

		for (course_id, credit_type, amount, course_number) in credit_rows {
			let credit_type = credit_type.parse::<CreditType>()?;
			credits
				.entry(course_id)
				.or_default()
				.push(CreditEntry { credit_type, amount, course_number });
		}

		let state_rows = select_related(
			"SELECT course_id, state_code FROM CourseStates",
			&course_ids,
			"position",
		)
		.build_query_as::<(CourseID, String)>()
		.fetch_all(&self.database)
		.await?;

		for (course_id, state_code) in state_rows {
			let state_code = state_code.parse::<StateCode>()?;
			states
				.entry(course_id)
				.or_default()
				.push(StateEntry { state_code });
		}

		let courses = rows
			.into_iter()
			.map(|row| Course {
				formats: formats.remove(&row.id).unwrap_or_default(),
				credits: credits.remove(&row.id).unwrap_or_default(),
				states: states.remove(&row.id).unwrap_or_default(),
				id: row.id,
				sku: row.sku,
				title: row.title,
				description: row.description,
				author: row.author,
				main_subject: row.main_subject,
				table_of_contents_url: row.table_of_contents_url,
				course_content_url: row.course_content_url,
				created_on: row.created_on,
			})
			.collect();

		Ok(courses)
	}
}

/// A row of the `Courses` table.
#[derive(Debug, sqlx::FromRow)]
struct CourseRow
{
	id: CourseID,
	sku: String,
	title: String,
	description: String,
	author: String,
	main_subject: String,
	table_of_contents_url: String,
	course_content_url: String,
	created_on: DateTime<Utc>,
}

/// Columns selected for [`CourseRow`].
const COURSE_COLUMNS: &str = r"
	id,
	sku,
	title,
	description,
	author,
	main_subject,
	table_of_contents_url,
	course_content_url,
	created_on
";

/// Builds `{select} WHERE course_id IN (...) ORDER BY course_id, {order_by}`.
fn select_related<'args>(
	select: &str,
	course_ids: &'args [CourseID],
	order_by: &str,
) -> QueryBuilder<'args, MySql>
{
	let mut query = QueryBuilder::new(select);

	query.push(" WHERE course_id IN (");

	{
		let mut separated = query.separated(", ");

		for course_id in course_ids {
			separated.push_bind(*course_id);
		}
	}

	query.push(") ORDER BY course_id, ").push(order_by);
	query
}

/// Pairs each state with its position in the list.
fn numbered(states: Vec<StateEntry>) -> Result<Vec<(u16, StateEntry)>>
{
	states
		.into_iter()
		.enumerate()
		.map(|(position, state)| {
			u16::try_from(position)
				.map(|position| (position, state))
				.map_err(|_| Error::InvalidField {
					field: "states",
					reason: format!(
						"a course can list at most {} states",
						usize::from(u16::MAX) + 1
					),
				})
		})
		.collect()
}

#[async_trait]
impl CourseStore for MySqlCourseStore
{
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn sku_exists(&self, sku: &str) -> Result<bool>
	{
		let exists = sqlx::query_scalar::<_, u32>("SELECT id FROM Courses WHERE sku = ? LIMIT 1")
			.bind(sku)
			.fetch_optional(&self.database)
			.await?
			.is_some();

		Ok(exists)
	}

	#[tracing::instrument(
		level = "debug",
		skip_all,
		fields(sku = %course.draft.sku),
		err(Debug, level = "debug")
	)]
	async fn create_course(&self, course: NewCourse) -> Result<CourseID>
	{
		let NewCourse { draft, formats, credits, states } = course;
		let states = numbered(states)?;
		let mut txn = self.database.begin().await?;

		let course_id = sqlx::query(
			r"
			INSERT INTO
			  Courses (
			    sku,
			    title,
			    description,
			    author,
			    main_subject,
			    table_of_contents_url,
			    course_content_url
			  )
			VALUES
			  (?, ?, ?, ?, ?, ?, ?)
			",
		)
		.bind(&draft.sku)
		.bind(&draft.title)
		.bind(&draft.description)
		.bind(&draft.author)
		.bind(&draft.main_subject)
		.bind(&draft.table_of_contents_url)
		.bind(&draft.course_content_url)
		.execute(txn.as_mut())
		.await
		.map_err(|error| {
			if error.is_duplicate_entry() {
				Error::SkuAlreadyExists { sku: draft.sku.clone() }
			} else {
				Error::Database(error)
			}
		})?
		.last_insert_id();

		let course_id = u32::try_from(course_id)
			.map(CourseID)
			.map_err(|_| sqlx::Error::Protocol(format!("course id {course_id} exceeds u32")))?;

		for FormatEntry { format, price } in formats {
			sqlx::query("INSERT INTO CourseFormats (course_id, format, price) VALUES (?, ?, ?)")
				.bind(course_id)
				.bind(format.api())
				.bind(price)
				.execute(txn.as_mut())
				.await?;
		}

		for CreditEntry { credit_type, amount, course_number } in credits {
			sqlx::query(
				r"
				INSERT INTO
				  CourseCredits (course_id, credit_type, amount, course_number)
				VALUES
				  (?, ?, ?, ?)
				",
			)
			.bind(course_id)
			.bind(credit_type.api())
			.bind(amount)
			.bind(course_number)
			.execute(txn.as_mut())
			.await?;
		}

		for (position, StateEntry { state_code }) in states {
			sqlx::query(
				"INSERT INTO CourseStates (course_id, position, state_code) VALUES (?, ?, ?)",
			)
			.bind(course_id)
			.bind(position)
			.bind(state_code.as_str())
			.execute(txn.as_mut())
			.await?;
		}

		txn.commit().await?;

		tracing::trace!(%course_id, "created course");

		Ok(course_id)
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn fetch_course(&self, course_id: CourseID) -> Result<Option<Course>>
	{
		let Some(row) = sqlx::query_as::<_, CourseRow>(&format!(
			"SELECT {COURSE_COLUMNS} FROM Courses WHERE id = ?"
		))
		.bind(course_id)
		.fetch_optional(&self.database)
		.await?
		else {
			return Ok(None);
		};

		Ok(self.hydrate(vec![row]).await?.pop())
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn fetch_courses(&self, limit: u64, offset: u64) -> Result<(Vec<Course>, u64)>
	{
		let mut txn = self.database.begin().await?;

		let rows = sqlx::query_as::<_, CourseRow>(&format!(
			r"
			SELECT SQL_CALC_FOUND_ROWS
			  {COURSE_COLUMNS}
			FROM
			  Courses
			ORDER BY
			  created_on DESC,
			  id DESC
			LIMIT
			  ? OFFSET ?
			"
		))
		.bind(limit)
		.bind(offset)
		.fetch_all(txn.as_mut())
		.await?;

		let total = txn.total_rows().await?;

		txn.commit().await?;

		Ok((self.hydrate(rows).await?, total))
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn update_course(&self, course_id: CourseID, update: CourseUpdate) -> Result<bool>
	{
		let CourseUpdate {
			sku,
			title,
			description,
			author,
			main_subject,
			table_of_contents_url,
			course_content_url,
		} = update;

		let conflicting_sku = sku.clone();

		let result = sqlx::query(
			r"
			UPDATE
			  Courses
			SET
			  sku = COALESCE(?, sku),
			  title = COALESCE(?, title),
			  description = COALESCE(?, description),
			  author = COALESCE(?, author),
			  main_subject = COALESCE(?, main_subject),
			  table_of_contents_url = COALESCE(?, table_of_contents_url),
			  course_content_url = COALESCE(?, course_content_url)
			WHERE
			  id = ?
			",
		)
		.bind(sku)
		.bind(title)
		.bind(description)
		.bind(author)
		.bind(main_subject)
		.bind(table_of_contents_url)
		.bind(course_content_url)
		.bind(course_id)
		.execute(&self.database)
		.await
		.map_err(|error| match conflicting_sku {
			Some(sku) if error.is_duplicate_entry() => Error::SkuAlreadyExists { sku },
			_ => Error::Database(error),
		})?;

		if result.rows_affected() > 0 {
			return Ok(true);
		}

		// MySQL does not count rows that were matched but left unchanged.
		let exists = sqlx::query_scalar::<_, u32>("SELECT id FROM Courses WHERE id = ?")
			.bind(course_id)
			.fetch_optional(&self.database)
			.await?
			.is_some();

		Ok(exists)
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn set_course_file(
		&self,
		course_id: CourseID,
		kind: CourseFileKind,
		url: &str,
	) -> Result<()>
	{
		sqlx::query(&format!("UPDATE Courses SET {} = ? WHERE id = ?", kind.column()))
			.bind(url)
			.bind(course_id)
			.execute(&self.database)
			.await?;

		Ok(())
	}
}
