//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::CourseFileKind;
use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::services::storage;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the course service.
#[derive(Debug, Error)]
pub enum Error
{
	/// We have no data to return.
	#[error("no data")]
	NoData,

	/// A request targeted at a specific course was made, but the course could
	/// not be found.
	#[error("course does not exist")]
	CourseDoesNotExist,

	/// A course with the requested SKU already exists.
	#[error("a course with SKU `{sku}` already exists")]
	SkuAlreadyExists
	{
		/// The conflicting SKU.
		sku: String,
	},

	/// A required form field was not submitted.
	#[error("missing required field `{field}`")]
	MissingField
	{
		/// The field's name.
		field: &'static str,
	},

	/// A submitted field has an unusable value.
	#[error("invalid value for `{field}`: {reason}")]
	InvalidField
	{
		/// The field's name.
		field: &'static str,

		/// What's wrong with it.
		reason: String,
	},

	/// A course file was not a PDF.
	#[error("{kind} must be a PDF")]
	NotAPdf
	{
		/// Which file was rejected.
		kind: CourseFileKind,
	},

	/// The public URL of an uploaded file does not fit into the database.
	#[error("public URL of the {kind} is too long")]
	UrlTooLong
	{
		/// Which file the URL belongs to.
		kind: CourseFileKind,
	},

	/// A value in the database could not be interpreted.
	#[error("corrupted course data: {0}")]
	Corrupted(#[from] cpe::Error),

	/// Something went wrong with the file storage.
	#[error(transparent)]
	Storage(#[from] storage::Error),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::NoData => ProblemType::NoContent,
			Self::CourseDoesNotExist => ProblemType::ResourceNotFound,
			Self::SkuAlreadyExists { .. } => ProblemType::ResourceAlreadyExists,
			Self::MissingField { .. } => ProblemType::MissingFormField,
			Self::InvalidField { .. } => ProblemType::InvalidField,
			Self::NotAPdf { .. } => ProblemType::UnsupportedFileType,
			Self::UrlTooLong { .. } | Self::Corrupted(_) => ProblemType::Internal,
			Self::Storage(source) => source.problem_type(),
			Self::Database(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		match self {
			Self::SkuAlreadyExists { sku } => ext.add("sku", sku),
			Self::MissingField { field } | Self::InvalidField { field, .. } => ext.add("field", field),
			_ => {}
		}
	}
}
