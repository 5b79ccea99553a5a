//! This module implements functionality to update a single record.

use problem_details::AsProblemDetails;

use super::{RecordFields, RecordId, RecordService, UpdateAck, UpdateOutcome};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Updates the record with the given `id`.
	///
	/// Only the fields set in `changes` are touched; everything else stays as it is.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn update_record(&self, id: &str, changes: RecordFields) -> Result
	{
		let id = id.parse::<RecordId>().map_err(|_| Error::NotFound)?;

		let outcome = if changes.is_empty() {
			self.store
				.find_one(id)
				.await
				.inspect_err(|error| error!(%error, %id, "failed to fetch record"))?
				.map(|_| UpdateOutcome { matched: 1, modified: 0 })
		} else {
			Some(
				self.store
					.update_one(id, changes.into_document())
					.await
					.inspect_err(|error| error!(%error, %id, "failed to update record"))?,
			)
		};

		let UpdateOutcome { matched, modified } = outcome
			.filter(|outcome| outcome.matched > 0)
			.ok_or(Error::NotFound)?;

		if modified > 0 {
			info!(%id, "updated record");
		}

		Ok(UpdateAck {
			acknowledged: true,
			matched_count: matched,
			modified_count: modified,
		})
	}
}

/// Response for updating a record.
pub type Response = UpdateAck;

/// Errors that can occur when updating a record.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Not found")]
	NotFound,

	#[error("Error updating record: {0}")]
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
