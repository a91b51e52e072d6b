//! This module contains the [`Config`] struct - a set of configuration options
//! that will be read from the environment on startup.
//!
//! See the `.env.example` file in the root of the repository for all the
//! relevant variables and example values.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

use thiserror::Error;
use url::Url;

use crate::services::import::ImportPacing;

/// Admin token accepted by development builds when `CPE_ADMIN_TOKEN` is unset.
#[cfg(not(feature = "production"))]
pub const DEVELOPMENT_ADMIN_TOKEN: &str = "cpe-dev-admin-token";

/// The API's runtime configuration.
#[derive(Clone)]
pub struct Config
{
	/// The address the HTTP server will listen on.
	pub addr: SocketAddr,

	/// Database connection URL.
	pub database_url: Url,

	/// Base URL of the object storage that holds course PDFs.
	pub storage_url: Url,

	/// Service key for the object storage.
	pub storage_key: String,

	/// Value the `admin_token` cookie has to match for admin routes.
	pub admin_token: String,

	/// Origin of the admin dashboard, allowed to make credentialed requests.
	///
	/// Requests from localhost are allowed if this is not set.
	pub dashboard_origin: Option<Url>,

	/// Pacing for spreadsheet imports.
	pub import_pacing: ImportPacing,

	/// Directory for log files.
	///
	/// Logs are only written to stderr if this is not set.
	pub log_dir: Option<PathBuf>,
}

/// Error that can occur while initializing the API's [`Config`].
#[derive(Debug, Error)]
pub enum InitializeConfigError
{
	/// A required environment variable was not found or invalid
	/// UTF-8.
	#[error("failed to read environment variable `{var}`: {source}")]
	Env
	{
		/// The environment variable we tried to read.
		var: &'static str,

		/// The original error we got from [`std::env::var()`] when we tried to
		/// read a value.
		source: env::VarError,
	},

	/// A required configuration option was empty.
	#[error("`{var}` cannot be empty")]
	EmptyValue
	{
		/// The environment variable we read.
		var: &'static str,
	},

	/// A required configuration option could not be parsed into the required
	/// type.
	#[error("failed to parse configuration value `{var}`: {source}")]
	Parse
	{
		/// The environment variable containing the value.
		var: &'static str,

		/// The parsing error.
		source: Box<dyn std::error::Error + Send + Sync + 'static>,
	},

	/// The import batch size was set to zero.
	#[error("`CPE_IMPORT_BATCH_SIZE` must be at least 1")]
	ZeroBatchSize,
}

impl Config
{
	/// Initializes a [`Config`] by reading and parsing environment variables.
	#[tracing::instrument(err(Debug))]
	pub fn new() -> Result<Self, InitializeConfigError>
	{
		let addr = parse_from_env_opt::<SocketAddr>("CPE_API_ADDR")?
			.unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 42069)));

		let database_url = parse_from_env::<Url>("DATABASE_URL")?;
		let storage_url = parse_from_env::<Url>("CPE_STORAGE_URL")?;
		let storage_key = parse_from_env::<String>("CPE_STORAGE_KEY")?;

		#[cfg(feature = "production")]
		let admin_token = parse_from_env::<String>("CPE_ADMIN_TOKEN")?;

		#[cfg(not(feature = "production"))]
		let admin_token = parse_from_env_opt::<String>("CPE_ADMIN_TOKEN")?
			.unwrap_or_else(|| String::from(DEVELOPMENT_ADMIN_TOKEN));

		let dashboard_origin = parse_from_env_opt::<Url>("CPE_DASHBOARD_ORIGIN")?;

		let defaults = ImportPacing::default();
		let batch_size = parse_from_env_opt::<usize>("CPE_IMPORT_BATCH_SIZE")?
			.unwrap_or(defaults.batch_size);

		if batch_size == 0 {
			return Err(InitializeConfigError::ZeroBatchSize);
		}

		let row_delay = parse_from_env_opt::<u64>("CPE_IMPORT_ROW_DELAY_MS")?
			.map_or(defaults.row_delay, Duration::from_millis);

		let batch_delay = parse_from_env_opt::<u64>("CPE_IMPORT_BATCH_DELAY_MS")?
			.map_or(defaults.batch_delay, Duration::from_millis);

		let import_pacing = ImportPacing { batch_size, row_delay, batch_delay };
		let log_dir = parse_from_env_opt::<PathBuf>("CPE_LOG_DIR")?;

		Ok(Self {
			addr,
			database_url,
			storage_url,
			storage_key,
			admin_token,
			dashboard_origin,
			import_pacing,
			log_dir,
		})
	}
}

impl fmt::Debug for Config
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("Config")
			.field("addr", &format_args!("{}", self.addr))
			.field("database_url", &format_args!("{:?}", self.database_url.as_str()))
			.field("storage_url", &format_args!("{:?}", self.storage_url.as_str()))
			.field("storage_key", &"*****")
			.field("admin_token", &"*****")
			.field("dashboard_origin", &self.dashboard_origin.as_ref().map(Url::as_str))
			.field("import_pacing", &self.import_pacing)
			.field("log_dir", &self.log_dir)
			.finish()
	}
}

/// Reads and parses an environment variable.
fn parse_from_env<T>(var: &'static str) -> Result<T, InitializeConfigError>
where
	T: FromStr,
	T::Err: std::error::Error + Send + Sync + 'static,
{
	let value = env::var(var).map_err(|source| InitializeConfigError::Env { var, source })?;

	if value.is_empty() {
		return Err(InitializeConfigError::EmptyValue { var });
	}

	value
		.parse::<T>()
		.map_err(|error| InitializeConfigError::Parse { var, source: Box::new(error) })
}

/// Reads and parses an environment variable.
///
/// Returns [`None`] if a variable does not exist or is empty.
fn parse_from_env_opt<T>(var: &'static str) -> Result<Option<T>, InitializeConfigError>
where
	T: FromStr,
	T::Err: std::error::Error + Send + Sync + 'static,
{
	let Some(value) = env::var(var).ok() else {
		return Ok(None);
	};

	if value.is_empty() {
		return Ok(None);
	}

	value
		.parse::<T>()
		.map(Some)
		.map_err(|error| InitializeConfigError::Parse { var, source: Box::new(error) })
}
