//! Security schemes for the OpenAPI spec.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::OpenApi;

use crate::services::auth::COOKIE_NAME;

/// Registers the admin cookie as a security scheme.
pub struct Security;

impl utoipa::Modify for Security
{
	fn modify(&self, openapi: &mut OpenApi)
	{
		let admin_cookie = SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
			COOKIE_NAME,
			"Token shared with the admin dashboard.",
		)));

		openapi
			.components
			.get_or_insert_with(Default::default)
			.add_security_scheme("Admin Cookie", admin_cookie);
	}
}
