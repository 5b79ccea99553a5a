use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// Returns a CORS layer for the given config.
///
/// An empty list of allowed origins results in a permissive layer that accepts any origin.
pub(crate) fn layer(config: &CorsConfig) -> CorsLayer
{
	if config.allowed_origins.is_empty() {
		return CorsLayer::permissive();
	}

	let allowed_origins = config
		.allowed_origins
		.iter()
		.filter_map(|origin| {
			origin
				.parse::<HeaderValue>()
				.inspect_err(|error| warn!(%error, %origin, "ignoring invalid CORS origin"))
				.ok()
		})
		.collect::<Vec<_>>();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(allowed_origins))
		.allow_methods(Any)
		.allow_headers(Any)
}
