//! The [`AdminSession`] extractor.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::Cookie;
use http::{header, request};

use super::{AdminRejection, AuthService};

/// The name of the HTTP cookie that holds the admin token.
pub const COOKIE_NAME: &str = "admin_token";

/// Proof that a request was made by an admin.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct AdminSession;

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
	S: Send + Sync + 'static,
	AuthService: FromRef<S>,
{
	type Rejection = AdminRejection;

	#[tracing::instrument(
		name = "AdminSession::from_request_parts",
		skip_all,
		err(Debug, level = "debug")
	)]
	async fn from_request_parts(
		req: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection>
	{
		let token = req
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.flat_map(|value| value.to_str())
			.flat_map(|value| Cookie::split_parse_encoded(value.trim().to_owned()))
			.flatten()
			.find(|cookie| cookie.name() == COOKIE_NAME)
			.ok_or(AdminRejection::MissingCookie)?;

		if !AuthService::from_ref(state).is_admin_token(token.value()) {
			return Err(AdminRejection::InvalidToken);
		}

		tracing::trace!("authenticated admin");

		Ok(Self)
	}
}
