use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::response::IntoResponse;
use axum::routing::Route;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::request_id::RequestId;
use tower_http::trace::{MakeSpan, TraceLayer};

/// Returns a layer that wraps every request in a span and logs failed responses.
///
/// If `include_headers` is set, the request headers are recorded on the span as well.
pub(crate) fn layer(
	include_headers: bool,
) -> impl tower::Layer<
	Route,
	Service: tower::Service<
		crate::http::Request,
		Response: IntoResponse + 'static,
		Error: Into<Infallible> + 'static,
		Future: Send + 'static,
	> + Clone
	             + Send
	             + Sync
	             + 'static,
> + Clone
       + Send
       + Sync
       + 'static
{
	TraceLayer::new_for_http()
		.make_span_with(RequestSpan { include_headers })
		.on_response(on_response)
		.on_failure(on_failure)
}

#[derive(Debug, Clone, Copy)]
struct RequestSpan
{
	include_headers: bool,
}

impl<B> MakeSpan<B> for RequestSpan
{
	fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span
	{
		let request_id = request
			.extensions()
			.get::<RequestId>()
			.and_then(|request_id| request_id.header_value().to_str().ok());

		let span = info_span! {
			target: "records_api::http",
			"request",
			request.id = tracing::field::Empty,
			request.peer_addr = tracing::field::Empty,
			request.method = %request.method(),
			request.uri = %request.uri(),
			request.headers = tracing::field::Empty,
			response.status = tracing::field::Empty,
			latency = tracing::field::Empty,
		};

		if let Some(request_id) = request_id {
			span.record("request.id", request_id);
		}

		if let Some(ConnectInfo(peer_addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
			span.record("request.peer_addr", format_args!("{peer_addr}"));
		}

		if self.include_headers {
			span.record("request.headers", format_args!("{:?}", request.headers()));
		}

		span
	}
}

fn on_response(response: &crate::http::Response, latency: Duration, span: &tracing::Span)
{
	span.record("response.status", format_args!("{}", response.status()))
		.record("latency", format_args!("{latency:?}"));
}

fn on_failure(failure: ServerErrorsFailureClass, _latency: Duration, _span: &tracing::Span)
{
	match failure {
		ServerErrorsFailureClass::Error(error) => {
			error!(target: "records_api::runtime::errors", %error, "error occurred during request");
		}
		ServerErrorsFailureClass::StatusCode(status) if status.is_server_error() => {
			error!(target: "records_api::runtime::errors", %status, "error occurred during request");
		}
		ServerErrorsFailureClass::StatusCode(status) => {
			warn!(target: "records_api::runtime::errors", %status, "error occurred during request");
		}
	}
}
