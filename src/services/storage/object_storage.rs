//! An HTTP client for bucket-based object storage.
//!
//! Objects are uploaded with `POST {base}/storage/v1/object/{bucket}/{path}`
//! and served publicly from `{base}/storage/v1/object/public/{bucket}/{path}`.

use std::fmt;

use axum::async_trait;
use http::header;
use url::Url;

use super::{Error, FileStore, Result, StorageObject};

/// A [`FileStore`] backed by object storage reachable over HTTP.
#[derive(Clone)]
pub struct ObjectStorage
{
	/// The storage's base URL, always ending in `/`.
	base_url: Url,

	/// Service key sent as a bearer token.
	key: String,

	/// HTTP client for talking to the storage.
	http_client: reqwest::Client,
}

impl fmt::Debug for ObjectStorage
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("ObjectStorage")
			.field("base_url", &format_args!("{}", self.base_url))
			.finish_non_exhaustive()
	}
}

impl ObjectStorage
{
	/// Create a new [`ObjectStorage`] client.
	#[tracing::instrument(skip(key, http_client))]
	pub fn new(mut base_url: Url, key: String, http_client: reqwest::Client) -> Self
	{
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}

		Self { base_url, key, http_client }
	}

	/// The URL objects are uploaded to.
	fn upload_url(&self, bucket: &str, path: &str) -> Result<Url>
	{
		Ok(self.base_url.join(&format!("storage/v1/object/{bucket}/{path}"))?)
	}

	/// The URL objects are publicly served from.
	fn public_url(&self, bucket: &str, path: &str) -> Result<Url>
	{
		Ok(self.base_url.join(&format!("storage/v1/object/public/{bucket}/{path}"))?)
	}
}

#[async_trait]
impl FileStore for ObjectStorage
{
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn upload(&self, object: StorageObject<'_>) -> Result<Url>
	{
		let upload_url = self.upload_url(object.bucket, object.path)?;
		let response = self
			.http_client
			.post(upload_url)
			.bearer_auth(&self.key)
			.header("x-upsert", "true")
			.header(header::CONTENT_TYPE, object.content_type)
			.body(object.bytes)
			.send()
			.await?;

		let status = response.status();

		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();

			return Err(Error::UploadRejected { status, message });
		}

		self.public_url(object.bucket, object.path)
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn verify(&self, url: &Url) -> Result<()>
	{
		let status = self.http_client.head(url.clone()).send().await?.status();

		if !status.is_success() {
			return Err(Error::Unreachable { url: url.clone(), status });
		}

		Ok(())
	}
}
