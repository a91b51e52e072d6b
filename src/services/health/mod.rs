//! A very basic service that acts as a healthcheck.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

pub(crate) mod http;

/// A service that responds with a short status report if the API is up.
#[derive(Clone, Copy)]
pub struct HealthService
{
	/// When the service was created.
	started_at: Instant,
}

impl fmt::Debug for HealthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("HealthService")
			.field("uptime", &self.uptime())
			.finish()
	}
}

/// Response body of the health check.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthReport
{
	/// Always `"ok"`.
	pub status: &'static str,

	/// Seconds since the API started.
	pub uptime_seconds: u64,
}

impl HealthService
{
	/// Create a new [`HealthService`].
	#[tracing::instrument]
	pub fn new() -> Self
	{
		Self { started_at: Instant::now() }
	}

	/// Reports that the API is up, and for how long.
	#[tracing::instrument(level = "debug")]
	pub fn report(&self) -> HealthReport
	{
		HealthReport { status: "ok", uptime_seconds: self.uptime().as_secs() }
	}

	/// How long the service has been running.
	pub fn uptime(&self) -> Duration
	{
		self.started_at.elapsed()
	}
}
