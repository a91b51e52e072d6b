//! HTTP handlers for this service.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing, Router};
use http::header;

use super::UserService;
use crate::middleware;
use crate::services::auth::AdminSession;

impl From<UserService> for Router
{
	fn from(svc: UserService) -> Self
	{
		Router::new()
			.route("/admin/import/users/template", routing::get(get_template))
			.route_layer(middleware::cors::dashboard(svc.auth_svc.dashboard_origin(), [
				http::Method::OPTIONS,
				http::Method::GET,
			]))
			.with_state(svc)
	}
}

/// Downloads the CSV template for importing users.
#[tracing::instrument]
#[utoipa::path(
	get,
	path = "/api/admin/import/users/template",
	tag = "Import",
	responses(
		(status = OK, description = "The template.", body = String, content_type = "text/csv"),
		(status = UNAUTHORIZED, description = "The admin cookie is missing or invalid."),
	),
	security(("Admin Cookie" = []))
)]
pub(crate) async fn get_template(
	_session: AdminSession,
	State(svc): State<UserService>,
) -> impl IntoResponse
{
	let headers = [
		(header::CONTENT_TYPE, "text/csv; charset=utf-8"),
		(header::CONTENT_DISPOSITION, "attachment; filename=\"user_import_template.csv\""),
	];

	(headers, svc.import_template())
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use http::StatusCode;
	use tower::ServiceExt;

	use super::*;
	use crate::services::AuthService;
	use crate::testing;

	fn router() -> Router
	{
		Router::from(UserService::new(AuthService::new(testing::ADMIN_TOKEN, None)))
	}

	#[tokio::test]
	async fn download_template() -> color_eyre::Result<()>
	{
		let req = http::Request::get("/admin/import/users/template")
			.header(header::COOKIE, format!("admin_token={}", testing::ADMIN_TOKEN))
			.body(Body::empty())?;

		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);
		testing::assert_eq!(res.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
		testing::assert_eq!(
			res.headers().get_all(header::CONTENT_TYPE).iter().count(),
			1,
			"only one content type is sent",
		);

		let body = testing::text_body(res).await?;

		testing::assert_eq!(body, "email,password,first_name,last_name,company,phone,role\n");

		Ok(())
	}

	#[tokio::test]
	async fn template_requires_admin() -> color_eyre::Result<()>
	{
		let req = http::Request::get("/admin/import/users/template").body(Body::empty())?;
		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

		Ok(())
	}
}
