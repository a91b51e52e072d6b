//! This module contains general database utilities.
//!
//! Most notably, it exports extension traits like [`SqlErrorExt`] and
//! [`TransactionExt`], and the function creating the connection pool used by
//! the course store.

use std::thread;

use sqlx::pool::PoolOptions;
use sqlx::{MySql, Pool};
use url::Url;

mod error;
pub use error::SqlErrorExt;

mod transaction;
pub use transaction::TransactionExt;

/// Creates a database connection pool and runs migrations.
#[tracing::instrument(target = "cpe_api::database", skip_all, err(Debug))]
pub async fn create_pool(url: &Url) -> sqlx::Result<Pool<MySql>>
{
	let pool = PoolOptions::new()
		.min_connections(1)
		.max_connections(max_connections())
		.connect(url.as_str())
		.await?;

	sqlx::migrate!("./database/migrations").run(&pool).await?;

	tracing::debug!(target: "cpe_api::database", "ran migrations");

	Ok(pool)
}

/// The maximum number of database pool connections to use.
fn max_connections() -> u32
{
	let available = thread::available_parallelism().map_or(1, |n| n.get());

	u32::try_from(available * 2).unwrap_or(u32::MAX)
}
