//! CORS middlewares.

use axum::http::{header, request, HeaderValue, Method};
use tower_http::cors::{AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

/// Creates a permissive CORS layer that allows `GET` requests.
///
/// Used for the public course catalog.
pub fn permissive() -> CorsLayer
{
	CorsLayer::permissive().allow_methods([Method::GET])
}

/// Creates a CORS layer for the admin dashboard.
///
/// Credentials (the admin cookie) are allowed. Requests are accepted from
/// `origin` if one is configured, and from localhost otherwise.
pub fn dashboard<M>(origin: Option<&Url>, methods: M) -> CorsLayer
where
	M: Into<AllowMethods>,
{
	let allow_origin = origin
		.and_then(|origin| HeaderValue::from_str(origin.origin().ascii_serialization().as_str()).ok())
		.map_or_else(|| AllowOrigin::predicate(is_localhost), AllowOrigin::exact);

	CorsLayer::new()
		.allow_methods(methods)
		.allow_credentials(true)
		.allow_headers([header::CONTENT_TYPE])
		.allow_origin(allow_origin)
}

/// Checks if an incoming request came from localhost, ignoring the port.
fn is_localhost(origin: &HeaderValue, _request: &request::Parts) -> bool
{
	let Some(origin) = origin.to_str().ok().and_then(|origin| Url::parse(origin).ok()) else {
		return false;
	};

	matches!(origin.scheme(), "http" | "https")
		&& matches!(origin.host_str(), Some("127.0.0.1" | "localhost"))
}
