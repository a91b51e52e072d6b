//! Global panic hook.
//!
//! Panics inside request handlers are caught by the HTTP stack, which means
//! they would otherwise only show up as a dropped connection. This hook makes
//! sure every panic ends up in the logs with a backtrace attached.

use std::backtrace::Backtrace;
use std::panic::{self, PanicInfo};
use std::thread;

/// Installs the API's panic hook.
///
/// The previously installed hook still runs afterwards.
#[tracing::instrument(target = "cpe_api::runtime", name = "panic_hook")]
pub fn install()
{
	let previous_hook = panic::take_hook();

	panic::set_hook(Box::new(move |info| {
		report(info);
		previous_hook(info);
	}));

	tracing::debug!(target: "cpe_api::runtime", "installed panic hook");
}

/// Emits a panic as an `error` event.
fn report(info: &PanicInfo<'_>)
{
	let thread = thread::current();
	let thread_name = thread.name().unwrap_or("<unnamed>");
	let location = info
		.location()
		.map_or_else(|| String::from("<unknown>"), ToString::to_string);

	let message = info
		.payload()
		.downcast_ref::<&str>()
		.map(|message| (*message).to_owned())
		.or_else(|| info.payload().downcast_ref::<String>().cloned())
		.unwrap_or_else(|| String::from("<non-string payload>"));

	tracing::error! {
		target: "cpe_api::audit_log",
		thread = thread_name,
		%location,
		backtrace = %Backtrace::force_capture(),
		"panicked: {message}",
	};
}
