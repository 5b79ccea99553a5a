use std::sync::OnceLock;

static BASE_URI: OnceLock<Box<str>> = OnceLock::new();

/// The base URI used when [`set_base_uri()`] was never called.
const DEFAULT_BASE_URI: &str = "/problems";

/// Sets the base URI for the `type` member of problem details responses.
///
/// Only the first call has any effect.
pub fn set_base_uri(uri: &str)
{
	drop(BASE_URI.set(Box::from(uri.trim_end_matches('/'))));
}

/// Joins the configured base URI with the given problem `slug`.
pub(crate) fn make_uri(slug: &str) -> http::Uri
{
	let base = BASE_URI.get().map_or(DEFAULT_BASE_URI, |base| &**base);

	format!("{base}/{slug}")
		.parse::<http::Uri>()
		.unwrap_or_else(|error| {
			warn!(%error, base, slug, "configured problem base URI is invalid");
			http::Uri::from_static(DEFAULT_BASE_URI)
		})
}

problem_type! {
	/// Every kind of error this API may respond with.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
	pub enum Problem
	{
		#[title = "missing header"]
		#[status = BAD_REQUEST]
		MissingHeader = "missing-header",

		#[title = "missing path parameter(s)"]
		#[status = BAD_REQUEST]
		MissingPathParameters = "missing-path-parameters",

		#[title = "invalid path parameter(s)"]
		#[status = BAD_REQUEST]
		InvalidPathParameters = "invalid-path-parameters",

		#[title = "invalid query string"]
		#[status = BAD_REQUEST]
		InvalidQueryString = "invalid-query-string",

		#[title = "invalid request body"]
		#[status = BAD_REQUEST]
		InvalidRequestBody = "invalid-request-body",

		#[title = "no data provided"]
		#[status = BAD_REQUEST]
		NoDataProvided = "no-data-provided",

		#[title = "invalid or empty list of IDs"]
		#[status = BAD_REQUEST]
		InvalidIdList = "invalid-id-list",

		#[title = "no valid IDs provided"]
		#[status = BAD_REQUEST]
		NoValidIds = "no-valid-ids",

		#[title = "resource not found"]
		#[status = NOT_FOUND]
		ResourceNotFound = "resource-not-found",

		#[title = "internal server error"]
		#[status = INTERNAL_SERVER_ERROR]
		Internal = "internal",
	}
}
