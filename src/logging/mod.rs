//! Log-capturing facilities.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod stderr;
mod files;

/// Initializes [`tracing-subscriber`].
///
/// Logs always go to stderr. If `log_dir` is given, they are also written to
/// daily log files in that directory.
///
/// NOTE: the returned [`WorkerGuard`] flushes the file writer when dropped,
///       which means it has to stay alive until the program exits!
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>>
{
	let (files_layer, guard) = match log_dir {
		None => (None, None),
		Some(log_dir) => {
			let (layer, guard) = files::layer(log_dir).context("files layer")?;
			(Some(layer), Some(guard))
		}
	};

	tracing_subscriber::registry()
		.with(stderr::layer())
		.with(files_layer)
		.try_init()
		.context("install subscriber")?;

	tracing::info! {
		target: "cpe_api::audit_log",
		log_dir = ?log_dir.map(Path::display),
		"initialized logging",
	};

	Ok(guard)
}
