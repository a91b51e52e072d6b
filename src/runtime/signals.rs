//! This module contains OS signal handlers.
//!
//! This is currently only used for graceful shutdown on SIGINT.

use tokio::signal;

/// The future returned by this function will resolve when the program receives
/// a `SIGINT` signal from the OS.
#[tracing::instrument(target = "cpe_api::runtime")]
pub async fn sigint()
{
	match signal::ctrl_c().await {
		Ok(()) => tracing::warn!(target: "cpe_api::audit_log", "received SIGINT, shutting down"),
		Err(error) => tracing::error!(target: "cpe_api::audit_log", %error, "failed to receive SIGINT"),
	}
}
