//! This module implements functionality to fetch a single record by its ID.

use problem_details::AsProblemDetails;

use super::{Document, RecordId, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Gets a specific record by its ID.
	///
	/// IDs that cannot be parsed are treated as unknown.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn get_record(&self, id: &str) -> Result
	{
		let id = id.parse::<RecordId>().map_err(|_| Error::NotFound)?;
		let record = self
			.store
			.find_one(id)
			.await
			.inspect_err(|error| error!(%error, %id, "failed to fetch record"))?
			.ok_or(Error::NotFound)?;

		Ok(record)
	}
}

/// Response for fetching a record.
pub type Response = Document;

/// Errors that can occur when fetching a record.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Not found")]
	NotFound,

	#[error("Error fetching record: {0}")]
	Database(#[from] DatabaseError),
}

impl AsProblemDetails for Error
{
	type ProblemType = Problem;

	fn problem_type(&self) -> Self::ProblemType
	{
		match self {
			Self::NotFound => Problem::ResourceNotFound,
			Self::Database(_) => Problem::Internal,
		}
	}
}

impl_into_response!(Error);
