//! This module contains the [`SqlErrorExt`] trait.

/// Extension trait for [`sqlx::Error`].
pub trait SqlErrorExt
{
	/// Checks if the error is a "duplicate entry" error.
	///
	/// MySQL reports unique key violations with SQLSTATE `23000`.
	fn is_duplicate_entry(&self) -> bool;
}

impl SqlErrorExt for sqlx::Error
{
	fn is_duplicate_entry(&self) -> bool
	{
		self.as_database_error()
			.is_some_and(|error| error.is_unique_violation() || error.code().as_deref() == Some("23000"))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn non_database_errors_are_not_duplicates()
	{
		assert!(!sqlx::Error::RowNotFound.is_duplicate_entry(), "RowNotFound is not a duplicate");
	}
}
