//! This module contains the [`Json`] response type.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A JSON response body.
///
/// Unlike [`axum::Json`], serialization failures are logged before the
/// `500` response is produced.
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response
	{
		match serde_json::to_vec(&self.0) {
			Ok(body) => {
				([(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())], body)
					.into_response()
			}
			Err(error) => {
				tracing::error!(%error, "failed to serialize response body");
				http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
			}
		}
	}
}
