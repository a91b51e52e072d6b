#![doc = include_str!("../README.md")]
// TODO: remove once https://github.com/tokio-rs/tracing/issues/2912 lands
#![allow(clippy::blocks_in_conditions)]

use std::fmt::Write;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::extract::ConnectInfo;
use axum::Router;
use cpe::StateTable;
use tokio::net::TcpListener;

pub mod runtime;
pub use runtime::Config;

pub mod http;
pub mod middleware;
pub mod database;
pub mod openapi;
pub mod services;

#[cfg(test)]
mod testing;

use services::courses::{CourseStore, MySqlCourseStore};
use services::import::ImportVocabulary;
use services::storage::ObjectStorage;
use services::{
	AuthService,
	CourseService,
	HealthService,
	ImportService,
	StorageService,
	UserService,
};

#[allow(clippy::missing_docs_in_private_items)]
type Server = axum::serve::Serve<
	IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
	axum::middleware::AddExtension<Router, ConnectInfo<SocketAddr>>,
>;

/// Run the API.
///
/// This function will not exit until a SIGINT signal is received.
/// If you want to supply a custom signal for graceful shutdown, use
/// [`run_until()`] instead.
pub async fn run(config: Config) -> anyhow::Result<()>
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(runtime::signals::sigint())
		.await
		.context("run http server")
}

/// Run the API until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the
/// provided `until` future, and shuts down the server when that future
/// resolves.
pub async fn run_until<Until>(config: Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = runtime::signals::sigint() => {}
			}
		})
		.await
		.context("run http server")
}

/// Runs the necessary setup for the API and returns a future that will run the
/// server when polled.
///
/// See [`run()`] and [`run_until()`].
async fn server(config: Config) -> anyhow::Result<Server>
{
	tracing::debug!(?config, "initializing API");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;

	tracing::info!(%addr, prod = cfg!(feature = "production"), "listening for requests");

	let router = router(config).await?;

	Ok(axum::serve(tcp_listener, router.into_make_service_with_connect_info::<SocketAddr>()))
}

/// Connects to the database, builds every service, and mounts their routes.
async fn router(config: Config) -> anyhow::Result<Router>
{
	let database = database::create_pool(&config.database_url)
		.await
		.context("connect to database")?;

	let http_client = reqwest::Client::new();
	let object_storage =
		ObjectStorage::new(config.storage_url, config.storage_key, http_client);

	let auth_svc = AuthService::new(config.admin_token, config.dashboard_origin);
	let storage_svc = StorageService::new(Arc::new(object_storage));
	let course_store: Arc<dyn CourseStore> = Arc::new(MySqlCourseStore::new(database));

	let course_svc = CourseService::new(
		Arc::clone(&course_store),
		storage_svc,
		auth_svc.clone(),
		StateTable::US,
	);

	let import_svc = ImportService::new(
		course_store,
		ImportVocabulary::US,
		config.import_pacing,
		auth_svc.clone(),
	);

	let user_svc = UserService::new(auth_svc);
	let spec = openapi::Spec::new();
	let mut routes_message = String::from("registering routes:\n");

	for (path, methods) in spec.routes() {
		writeln!(&mut routes_message, "    • {path} => [{methods}]")?;
	}

	tracing::info!("{routes_message}");

	let api = Router::new()
		.merge(course_svc)
		.merge(import_svc)
		.merge(user_svc);

	Ok(Router::new()
		.merge(HealthService::new())
		.nest("/api", api)
		.merge(spec)
		.layer(middleware::logging::layer!()))
}
