//! This module implements functionality to create a single record.

use problem_details::AsProblemDetails;

use super::{InsertOneAck, RecordFields, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Creates a new record from `fields`.
	///
	/// Fields that are not set are not stored at all.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn create_record(&self, fields: RecordFields) -> Result
	{
		let inserted_id = self
			.store
			.insert_one(fields.into_document())
			.await
			.inspect_err(|error| error!(%error, "failed to create record"))?;

		info!(id = %inserted_id, "created record");

		Ok(InsertOneAck { acknowledged: true, inserted_id })
	}
}

/// Response for creating a record.
pub type Response = InsertOneAck;

/// Errors that can occur when creating a record.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Error adding record: {0}")]
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
