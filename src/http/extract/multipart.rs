//! This module contains the [`MultipartForm`] extractor.
//!
//! Admin endpoints receive `multipart/form-data` bodies mixing plain text
//! fields and file uploads. [`MultipartForm`] buffers the whole form so
//! handlers can look fields up by name, in any order.

use std::collections::HashMap;
use std::fmt;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::multipart::MultipartRejection;
}

/// A file submitted as part of a [`MultipartForm`].
#[derive(Clone)]
pub struct UploadedFile
{
	/// The file name the client sent, if any.
	pub file_name: Option<String>,

	/// The `Content-Type` of the part, if any.
	pub content_type: Option<String>,

	/// The raw file contents.
	pub bytes: Bytes,
}

impl UploadedFile
{
	/// The lowercase extension of [`UploadedFile::file_name`].
	pub fn extension(&self) -> Option<String>
	{
		let file_name = self.file_name.as_deref()?;
		let (_, extension) = file_name.rsplit_once('.')?;

		Some(extension.to_ascii_lowercase())
	}

	/// Whether the client submitted an empty file input.
	pub fn is_empty(&self) -> bool
	{
		self.bytes.is_empty()
	}
}

impl fmt::Debug for UploadedFile
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("UploadedFile")
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// A fully buffered `multipart/form-data` request body.
#[derive(Debug, Default)]
pub struct MultipartForm
{
	/// Text fields by name.
	text: HashMap<String, String>,

	/// File fields by name.
	files: HashMap<String, UploadedFile>,
}

impl MultipartForm
{
	/// Returns a text field, trimmed. Blank fields count as missing.
	pub fn text(&self, name: &str) -> Option<&str>
	{
		self.text
			.get(name)
			.map(|value| value.trim())
			.filter(|value| !value.is_empty())
	}

	/// Removes a non-empty file field from the form.
	pub fn take_file(&mut self, name: &str) -> Option<UploadedFile>
	{
		self.files.remove(name).filter(|file| !file.is_empty())
	}

	#[cfg(test)]
	pub(crate) fn with_text(mut self, name: &str, value: &str) -> Self
	{
		self.text.insert(name.to_owned(), value.to_owned());
		self
	}

	#[cfg(test)]
	pub(crate) fn with_file(mut self, name: &str, file: UploadedFile) -> Self
	{
		self.files.insert(name.to_owned(), file);
		self
	}
}

#[async_trait]
impl<S> FromRequest<S> for MultipartForm
where
	S: Send + Sync,
{
	type Rejection = MultipartRejection;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		let mut multipart = Multipart::from_request(req, state).await?;
		let mut form = Self::default();

		while let Some(field) = multipart.next_field().await? {
			let Some(name) = field.name().map(ToOwned::to_owned) else {
				continue;
			};

			match field.file_name().map(ToOwned::to_owned) {
				None => {
					let value = field.text().await?;
					form.text.insert(name, value);
				}
				Some(file_name) => {
					let content_type = field.content_type().map(ToOwned::to_owned);
					let bytes = field.bytes().await?;

					tracing::trace!(%name, %file_name, len = bytes.len(), "received file");

					form.files.insert(name, UploadedFile {
						file_name: Some(file_name),
						content_type,
						bytes,
					});
				}
			}
		}

		Ok(form)
	}
}

/// Rejection for the [`MultipartForm`] extractor.
#[derive(Debug, Error)]
pub enum MultipartRejection
{
	/// The request was not a valid multipart request.
	#[error(transparent)]
	Base(#[from] base::MultipartRejection),

	/// A field could not be read.
	#[error(transparent)]
	Field(#[from] MultipartError),
}

impl IntoResponse for MultipartRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for MultipartRejection
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::InvalidRequestBody
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	fn file(bytes: &'static [u8]) -> UploadedFile
	{
		UploadedFile {
			file_name: Some(String::from("Course.PDF")),
			content_type: None,
			bytes: Bytes::from_static(bytes),
		}
	}

	#[test]
	fn blank_text_fields_are_missing() -> color_eyre::Result<()>
	{
		let form = MultipartForm::default()
			.with_text("title", "  Ethics  ")
			.with_text("author", "   ");

		testing::assert_eq!(form.text("title"), Some("Ethics"));
		testing::assert_eq!(form.text("author"), None);
		testing::assert_eq!(form.text("sku"), None);

		Ok(())
	}

	#[test]
	fn empty_files_are_missing() -> color_eyre::Result<()>
	{
		let mut form = MultipartForm::default()
			.with_file("table_of_contents", file(b"%PDF-1.7"))
			.with_file("course_content", file(b""));

		let toc = form.take_file("table_of_contents");

		testing::assert_eq!(toc.and_then(|file| file.extension()).as_deref(), Some("pdf"));
		testing::assert!(form.take_file("course_content").is_none());
		testing::assert!(form.take_file("table_of_contents").is_none(), "files can only be taken once");

		Ok(())
	}
}
