//! This module implements functionality to list records.

use problem_details::AsProblemDetails;
use serde::Deserialize;

use super::{Document, RecordFilter, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Returns every record matching the given search text and level filter.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn get_records(&self, request: Request) -> Result
	{
		let filter = RecordFilter::new(request.search, request.filter.as_deref());
		let records = self
			.store
			.find(&filter)
			.await
			.inspect_err(|error| error!(%error, "failed to fetch records"))?;

		Ok(records)
	}
}

/// Request for listing records.
#[derive(Debug, Default, Deserialize)]
pub struct Request
{
	/// Text that must be contained in either the name or the position, ignoring case.
	#[serde(default)]
	pub search: Option<String>,

	/// Comma-separated list of levels.
	#[serde(default)]
	pub filter: Option<String>,
}

/// Response for listing records.
pub type Response = Vec<Document>;

/// Errors that can occur when listing records.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Error fetching records: {0}")]
	Database(#[from] DatabaseError),
}

impl AsProblemDetails for Error
{
	type ProblemType = Problem;

	fn problem_type(&self) -> Self::ProblemType
	{
		match self {
			Self::Database(_) => Problem::Internal,
		}
	}
}

impl_into_response!(Error);
