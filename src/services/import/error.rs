//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::spreadsheet::SpreadsheetError;
use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::services::courses;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can abort an import.
///
/// Problems with individual rows never abort an import; they are reported in
/// the response instead.
#[derive(Debug, Error)]
pub enum Error
{
	/// The request did not include a file.
	#[error("no file was uploaded in the `{field}` field")]
	MissingFile
	{
		/// The form field we expected the file in.
		field: &'static str,
	},

	/// The uploaded file could not be decoded.
	#[error(transparent)]
	UnreadableSpreadsheet(#[from] SpreadsheetError),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingFile { .. } => ProblemType::MissingFormField,
			Self::UnreadableSpreadsheet(_) => ProblemType::UnreadableSpreadsheet,
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		if let Self::MissingFile { field } = self {
			ext.add("field", field);
		}
	}
}

/// Why a single row was not imported.
#[derive(Debug, Error)]
pub(super) enum RowError
{
	/// The row has no usable title.
	#[error("Missing or invalid title")]
	MissingTitle,

	/// The course store refused the course.
	#[error(transparent)]
	Store(#[from] courses::Error),
}
