//! This module contains wrappers around [`axum`]'s extractors, customizing
//! error responses.

mod uri;
pub use uri::{Path, Query, UriRejection};

mod json;
pub use json::Json;

pub mod multipart;
pub use multipart::{MultipartForm, MultipartRejection, UploadedFile};
