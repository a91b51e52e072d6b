//! This module contains configuration for the [`Trace`] middleware from
//! [`tower_http`].
//!
//! The resulting type contains unique function types, and as such cannot be
//! spelled out in code. This is why we export a macro instead, which will just
//! expand to the final expression.
//!
//! Request headers are never recorded, as they carry the admin cookie.
//!
//! [`Trace`]: tower_http::trace::Trace

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request};
use axum::response::Response;
use tower_http::classify::ServerErrorsFailureClass;
use uuid::Uuid;

/// Creates a middleware that will log incoming HTTP requests.
///
/// Every request gets its own span with a unique ID.
macro_rules! layer {
	() => {
		tower_http::trace::TraceLayer::new_for_http()
			.make_span_with($crate::middleware::logging::make_span)
			.on_response($crate::middleware::logging::on_response)
			.on_failure($crate::middleware::logging::on_failure)
	};
}

pub(crate) use layer;

#[doc(hidden)]
pub(crate) fn make_span(request: &Request) -> tracing::Span
{
	let peer = request
		.extensions()
		.get::<ConnectInfo<SocketAddr>>()
		.map_or_else(|| String::from("N/A"), |ConnectInfo(addr)| addr.to_string());

	let content_length = request
		.headers()
		.get(http::header::CONTENT_LENGTH)
		.and_then(|value| value.to_str().ok())
		.unwrap_or("0");

	tracing::info_span! {
		target: "cpe_api::http",
		"request",
		request.id = %Uuid::now_v7(),
		request.peer = %peer,
		request.method = %request.method(),
		request.uri = %request.uri(),
		request.content_length = %content_length,
		response.status = tracing::field::Empty,
		latency = tracing::field::Empty,
	}
}

#[doc(hidden)]
pub(crate) fn on_response(response: &Response, latency: Duration, span: &tracing::Span)
{
	span.record("response.status", format_args!("{}", response.status()))
		.record("latency", format_args!("{latency:?}"));

	tracing::debug!(target: "cpe_api::http", "finished processing request");
}

#[doc(hidden)]
pub(crate) fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
{
	match failure {
		ServerErrorsFailureClass::Error(error) => {
			tracing::error!(target: "cpe_api::audit_log", %error, ?latency, "request failed");
		}
		ServerErrorsFailureClass::StatusCode(status) => {
			tracing::error!(target: "cpe_api::audit_log", %status, ?latency, "request failed");
		}
	}
}
