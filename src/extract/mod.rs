//! Wrappers around [axum's extractors] that reject requests with problem details.
//!
//! [axum's extractors]: axum::extract

pub(crate) mod json;
pub(crate) use json::Json;

pub(crate) mod path;
pub(crate) use path::Path;

pub(crate) mod query;
pub(crate) use query::Query;
