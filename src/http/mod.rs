//! The HTTP facade.

use axum::extract::State;
use axum::{Router, routing};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::config::{HttpConfig, TracingConfig};
use crate::middleware;
use crate::services::RecordService;
use crate::services::records::health;

pub mod problem;
pub use problem::Problem;

pub type Body = axum::body::Body;
pub type Request<B = Body> = http::Request<B>;
pub type Response<B = Body> = http::Response<B>;

/// Returns the top-level service.
///
/// This is what we pass to [`axum::serve()`]. Trailing slashes are trimmed before routing, so
/// `/record/` and `/record` reach the same handlers.
pub fn service(
	record_service: RecordService,
	http_config: &HttpConfig,
	tracing_config: &TracingConfig,
) -> NormalizePath<Router>
{
	NormalizePathLayer::trim_trailing_slash().layer(router(
		record_service,
		http_config,
		tracing_config,
	))
}

/// Returns the top-level router.
pub fn router(
	record_service: RecordService,
	http_config: &HttpConfig,
	tracing_config: &TracingConfig,
) -> Router
{
	let health_router = Router::new()
		.route("/health", routing::get(health_check))
		.with_state(record_service.clone());

	Router::new()
		.merge(health_router)
		.nest("/record", crate::services::records::http::router(record_service))
		.layer(middleware::catch_panic::layer())
		.layer(middleware::cors::layer(&http_config.cors))
		.layer(middleware::trace::layer(tracing_config.include_http_headers))
		.layer(middleware::request_id::propagate_layer())
		.layer(middleware::request_id::set_layer())
}

/// Checks whether the database is reachable.
#[instrument(level = "debug", skip(record_service), err(Debug, level = "debug"))]
async fn health_check(State(record_service): State<RecordService>) -> health::Result<&'static str>
{
	record_service.health().await.map(|()| "ok")
}
