use anyhow::Context;
use cpe_api::runtime::{self, Config};

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: failed to load `.env` file: {error}");
	}

	let config = Config::new().context("load configuration")?;
	let _guard = logging::init(config.log_dir.as_deref()).context("initialize logging")?;

	runtime::panic_hook::install();

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	cpe_api::run(config).await
}
