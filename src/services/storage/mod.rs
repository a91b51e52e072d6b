//! A service for storing course PDFs in object storage.
//!
//! The storage backend is hidden behind the [`FileStore`] trait. In
//! production this is [`ObjectStorage`], an HTTP client for a bucket-based
//! object storage API.

use std::fmt;
use std::sync::Arc;

use axum::async_trait;
use axum::body::Bytes;
use url::Url;

mod error;
pub use error::{Error, Result};

mod object_storage;
pub use object_storage::ObjectStorage;

/// The bucket all course files are stored in.
pub const COURSE_FILES_BUCKET: &str = "course-files";

/// An object about to be uploaded.
#[derive(Clone)]
pub struct StorageObject<'a>
{
	/// The bucket to store the object in.
	pub bucket: &'a str,

	/// The object's path inside the bucket.
	pub path: &'a str,

	/// The object's contents.
	pub bytes: Bytes,

	/// The object's MIME type.
	pub content_type: &'a str,
}

impl fmt::Debug for StorageObject<'_>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("StorageObject")
			.field("bucket", &self.bucket)
			.field("path", &self.path)
			.field("len", &self.bytes.len())
			.field("content_type", &self.content_type)
			.finish()
	}
}

/// A place files can be uploaded to.
#[async_trait]
pub trait FileStore: Send + Sync + 'static
{
	/// Stores an object, replacing any previous object at the same path.
	///
	/// Returns the object's public URL.
	async fn upload(&self, object: StorageObject<'_>) -> Result<Url>;

	/// Checks that a public URL can actually be fetched.
	async fn verify(&self, url: &Url) -> Result<()>;
}

/// A service for storing course PDFs.
#[derive(Clone)]
pub struct StorageService
{
	/// The storage backend.
	files: Arc<dyn FileStore>,
}

impl fmt::Debug for StorageService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("StorageService").finish_non_exhaustive()
	}
}

impl StorageService
{
	/// Create a new [`StorageService`].
	#[tracing::instrument(skip_all)]
	pub fn new(files: Arc<dyn FileStore>) -> Self
	{
		Self { files }
	}

	/// Uploads a PDF and makes sure it is publicly reachable afterwards.
	#[tracing::instrument(level = "debug", skip(self, bytes), err(Debug, level = "debug"))]
	pub async fn store_pdf(&self, path: &str, bytes: Bytes) -> Result<Url>
	{
		let url = self
			.files
			.upload(StorageObject {
				bucket: COURSE_FILES_BUCKET,
				path,
				bytes,
				content_type: mime::APPLICATION_PDF.as_ref(),
			})
			.await?;

		tracing::debug!(%url, "uploaded file");

		self.files.verify(&url).await?;

		Ok(url)
	}
}
