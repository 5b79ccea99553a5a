//! This module implements functionality to delete a single record.

use problem_details::AsProblemDetails;

use super::{DeleteAck, RecordId, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Deletes the record with the given `id`.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn delete_record(&self, id: &str) -> Result
	{
		let id = id.parse::<RecordId>().map_err(|_| Error::NotFound)?;
		let deleted_count = self
			.store
			.delete_one(id)
			.await
			.inspect_err(|error| error!(%error, %id, "failed to delete record"))?;

		if deleted_count == 0 {
			return Err(Error::NotFound);
		}

		info!(%id, "deleted record");

		Ok(DeleteAck { acknowledged: true, deleted_count })
	}
}

/// Response for deleting a record.
pub type Response = DeleteAck;

/// Errors that can occur when deleting a record.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Not found")]
	NotFound,

	#[error("Error deleting record: {0}")]
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
