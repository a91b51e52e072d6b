//! This module contains extensions for [`sqlx::Transaction`].

use axum::async_trait;
use sqlx::{MySql, Transaction};

/// Extension trait for [`sqlx::Transaction`].
#[async_trait]
pub trait TransactionExt
{
	/// Returns the **total** amount of rows that _could have been_ fetched by
	/// the previous `SELECT` query, ignoring `LIMIT`.
	///
	/// This only works if the query contained `SQL_CALC_FOUND_ROWS`.
	async fn total_rows(&mut self) -> sqlx::Result<u64>;
}

#[async_trait]
impl<'c> TransactionExt for Transaction<'c, MySql>
{
	#[tracing::instrument(
		level = "trace",
		target = "cpe_api::database",
		skip(self),
		err(Debug, level = "debug")
	)]
	async fn total_rows(&mut self) -> sqlx::Result<u64>
	{
		let total = sqlx::query_scalar::<_, i64>("SELECT FOUND_ROWS()")
			.fetch_one(self.as_mut())
			.await?;

		u64::try_from(total)
			.map_err(|_| sqlx::Error::Protocol(format!("negative row count {total}")))
	}
}
