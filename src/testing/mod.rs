//! Utilities for unit tests.

use axum::body::Body;
use http_body_util::BodyExt;

mod macros;

#[allow(unused_imports)]
pub(crate) use macros::*;

mod memory_store;
pub(crate) use memory_store::MemoryStore;

pub type Error = anyhow::Error;
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Collects a response body and parses it as JSON.
pub(crate) async fn json_body(body: Body) -> Result<serde_json::Value>
{
	let bytes = body.collect().await?.to_bytes();
	let json = serde_json::from_slice(&bytes)?;

	Ok(json)
}
