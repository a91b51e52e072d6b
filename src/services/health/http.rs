//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::{HealthReport, HealthService};
use crate::http::extract::Json;

impl From<HealthService> for Router
{
	fn from(svc: HealthService) -> Self
	{
		Router::new().route("/", routing::get(get)).with_state(svc)
	}
}

/// Checks whether the API is up.
#[tracing::instrument]
#[utoipa::path(get, path = "/", tag = "Health", responses(
  (status = OK, description = "The API is healthy.", body = HealthReport),
))]
pub(crate) async fn get(State(svc): State<HealthService>) -> Json<HealthReport>
{
	Json(svc.report())
}

#[cfg(test)]
mod tests
{
	use std::time::Duration;

	use axum::body::Body;
	use http::StatusCode;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	#[tokio::test(start_paused = true)]
	async fn reports_uptime() -> color_eyre::Result<()>
	{
		let svc = HealthService::new();

		tokio::time::advance(Duration::from_secs(90)).await;

		let req = http::Request::get("/").body(Body::empty())?;
		let res = Router::from(svc).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let body = testing::json_body(res).await?;

		testing::assert_eq!(body["status"], "ok");
		testing::assert_eq!(body["uptime_seconds"], 90);

		Ok(())
	}
}
