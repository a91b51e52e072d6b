//! A service for bulk user management.
//!
//! Users are imported by the admin dashboard from a CSV file; this service
//! hands out the template for that file.

use std::fmt;

use axum::extract::FromRef;

use crate::services::AuthService;

pub(crate) mod http;

/// The header row of the user import template.
pub const USER_TEMPLATE_CSV: &str = "email,password,first_name,last_name,company,phone,role\n";

/// A service for bulk user management.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct UserService
{
	auth_svc: AuthService,
}

impl fmt::Debug for UserService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("UserService").finish_non_exhaustive()
	}
}

impl UserService
{
	/// Create a new [`UserService`].
	#[tracing::instrument]
	pub fn new(auth_svc: AuthService) -> Self
	{
		Self { auth_svc }
	}

	/// Returns the CSV template for importing users.
	pub fn import_template(&self) -> &'static str
	{
		USER_TEMPLATE_CSV
	}
}
