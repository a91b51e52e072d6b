//! This module contains the [`ProblemType`] enum.
//!
//! It represents an exhaustive list of all the possible error conditions the
//! API might return.

use http::StatusCode;

/// A problem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType
{
	/// An endpoint which can return many results has no results to return for a
	/// given request.
	NoContent,

	/// A required field of a multipart form was not submitted.
	MissingFormField,

	/// You did not provide the admin cookie, or it did not match.
	Unauthorized,

	/// A requested resource could not be found.
	ResourceNotFound,

	/// A request for creating a resource was made, but rejected because the
	/// resource already exists.
	ResourceAlreadyExists,

	/// An uploaded file has a type the endpoint does not accept.
	UnsupportedFileType,

	/// You provided path parameters which could not be deserialized.
	InvalidPathParameters,

	/// You provided a query string which could not be deserialized.
	InvalidQueryString,

	/// You provided a request body which could not be deserialized.
	InvalidRequestBody,

	/// A submitted field had a value that does not make sense, like an empty
	/// course title.
	InvalidField,

	/// An uploaded spreadsheet could not be decoded.
	///
	/// Nothing from the file has been imported.
	UnreadableSpreadsheet,

	/// We made a request to an external service and failed to decode the
	/// response.
	DecodeExternal,

	/// An internal failure occurred.
	///
	/// Any occurrence of this problem type is considered a bug!
	Internal,

	/// We failed to communicate with an external service, such as the file
	/// storage.
	ExternalService,
}

impl ProblemType
{
	/// Every problem type, used for documentation.
	pub const fn all() -> &'static [Self]
	{
		&[
			Self::NoContent,
			Self::MissingFormField,
			Self::Unauthorized,
			Self::ResourceNotFound,
			Self::ResourceAlreadyExists,
			Self::UnsupportedFileType,
			Self::InvalidPathParameters,
			Self::InvalidQueryString,
			Self::InvalidRequestBody,
			Self::InvalidField,
			Self::UnreadableSpreadsheet,
			Self::DecodeExternal,
			Self::Internal,
			Self::ExternalService,
		]
	}

	/// The HTTP status code responses of this problem type will have.
	pub const fn status(&self) -> StatusCode
	{
		match self {
			Self::NoContent => StatusCode::NO_CONTENT,
			Self::MissingFormField => StatusCode::BAD_REQUEST,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::ResourceNotFound => StatusCode::NOT_FOUND,
			Self::ResourceAlreadyExists => StatusCode::CONFLICT,
			Self::UnsupportedFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::InvalidPathParameters
			| Self::InvalidQueryString
			| Self::InvalidRequestBody
			| Self::InvalidField => StatusCode::UNPROCESSABLE_ENTITY,
			Self::UnreadableSpreadsheet | Self::DecodeExternal | Self::Internal => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
			Self::ExternalService => StatusCode::BAD_GATEWAY,
		}
	}

	/// Short, human-readable, description of the problem type.
	pub const fn title(&self) -> &'static str
	{
		match self {
			Self::NoContent => "no content",
			Self::MissingFormField => "missing form field",
			Self::Unauthorized => "unauthorized",
			Self::ResourceNotFound => "resource not found",
			Self::ResourceAlreadyExists => "resource already exists",
			Self::UnsupportedFileType => "unsupported file type",
			Self::InvalidPathParameters => "invalid path parameters",
			Self::InvalidQueryString => "invalid query string",
			Self::InvalidRequestBody => "invalid request body",
			Self::InvalidField => "invalid field value",
			Self::UnreadableSpreadsheet => "failed to import courses",
			Self::DecodeExternal => "failed to decode external response",
			Self::Internal => "internal server error",
			Self::ExternalService => "external service failed",
		}
	}
}
