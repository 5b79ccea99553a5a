use axum::extract::FromRequestParts;
use problem_details::AsProblemDetails;

use crate::http::Problem;

mod base
{
	pub use axum::extract::Path as Extractor;
	pub use axum::extract::rejection::PathRejection as Rejection;
}

/// An [extractor] for path parameters.
///
/// This is the same as [`axum::extract::Path`], except that it produces the same kind of error
/// response as all of our errors.
///
/// [extractor]: axum::extract
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Extractor), rejection(PathRejection))]
pub struct Path<T>(pub T);

/// Rejection for the [`Path`] extractor.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PathRejection(#[from] base::Rejection);

impl AsProblemDetails for PathRejection
{
	type ProblemType = Problem;

	fn problem_type(&self) -> Self::ProblemType
	{
		match self.0 {
			base::Rejection::MissingPathParams(_) => Problem::MissingPathParameters,
			_ => Problem::InvalidPathParameters,
		}
	}
}

impl_into_response!(PathRejection);
