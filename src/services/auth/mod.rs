//! A service for authenticating admin requests.
//!
//! Every route under `/api/admin` requires an `admin_token` cookie whose value
//! matches the configured admin token. Handlers opt into this by taking an
//! [`AdminSession`] argument; the extractor rejects the request with `401`
//! before the handler runs otherwise.

use std::fmt;
use std::sync::Arc;

use axum::extract::FromRef;
use subtle::ConstantTimeEq;
use url::Url;

mod session;
pub use session::{AdminSession, COOKIE_NAME};

mod rejection;
pub use rejection::AdminRejection;

/// A service for authenticating admin requests.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct AuthService
{
	admin_token: Arc<str>,
	dashboard_origin: Option<Arc<Url>>,
}

impl fmt::Debug for AuthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AuthService").finish_non_exhaustive()
	}
}

impl AuthService
{
	/// Create a new [`AuthService`].
	#[tracing::instrument(skip_all)]
	pub fn new<T>(admin_token: T, dashboard_origin: Option<Url>) -> Self
	where
		T: Into<Arc<str>>,
	{
		Self {
			admin_token: admin_token.into(),
			dashboard_origin: dashboard_origin.map(Arc::new),
		}
	}

	/// The origin of the admin dashboard, if one is configured.
	pub fn dashboard_origin(&self) -> Option<&Url>
	{
		self.dashboard_origin.as_deref()
	}

	/// Checks whether `token` is the admin token.
	///
	/// The comparison takes the same amount of time for any token of a given
	/// length.
	pub fn is_admin_token(&self, token: &str) -> bool
	{
		token.as_bytes().ct_eq(self.admin_token.as_bytes()).into()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn only_the_exact_token_is_accepted()
	{
		let svc = AuthService::new("secret", None);

		assert!(svc.is_admin_token("secret"), "exact token is accepted");
		assert!(!svc.is_admin_token("Secret"), "comparison is case-sensitive");
		assert!(!svc.is_admin_token("secret "), "no trimming");
		assert!(!svc.is_admin_token(""), "empty token is rejected");
	}
}
