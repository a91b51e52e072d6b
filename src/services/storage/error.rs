//! The errors that can occur when interacting with this service.

use http::StatusCode;
use thiserror::Error;
use url::Url;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the storage service.
#[derive(Debug, Error)]
pub enum Error
{
	/// The object path could not be turned into a URL.
	#[error("invalid object path: {0}")]
	InvalidPath(#[from] url::ParseError),

	/// The storage refused the upload.
	#[error("upload was rejected with status {status}: {message}")]
	UploadRejected
	{
		/// The response status.
		status: StatusCode,

		/// The response body.
		message: String,
	},

	/// The uploaded file's public URL could not be fetched.
	#[error("uploaded file is not reachable at `{url}` (status {status})")]
	Unreachable
	{
		/// The public URL.
		url: Url,

		/// The response status.
		status: StatusCode,
	},

	/// We failed to communicate with the storage.
	#[error("failed to reach file storage")]
	Http(#[from] reqwest::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::InvalidPath(_) => ProblemType::Internal,
			Self::UploadRejected { .. } | Self::Unreachable { .. } => ProblemType::ExternalService,
			Self::Http(source) => source.problem_type(),
		}
	}
}
