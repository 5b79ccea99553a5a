//! This module implements functionality to delete a batch of records by their IDs.

use problem_details::AsProblemDetails;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RecordId, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Deletes every record whose ID is listed in the request.
	///
	/// Entries that are not valid IDs are skipped, as long as at least one valid ID remains.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn delete_records(&self, request: Request) -> Result
	{
		let ids = match request.ids {
			Some(Value::Array(ids)) if !ids.is_empty() => ids,
			_ => return Err(Error::InvalidIdList),
		};

		let valid_ids = ids
			.iter()
			.filter_map(Value::as_str)
			.filter_map(|id| id.parse::<RecordId>().ok())
			.collect::<Vec<_>>();

		if valid_ids.is_empty() {
			return Err(Error::NoValidIds);
		}

		if valid_ids.len() < ids.len() {
			debug!(skipped = ids.len() - valid_ids.len(), "skipping invalid IDs");
		}

		let deleted_count = self
			.store
			.delete_many(&valid_ids)
			.await
			.inspect_err(|error| error!(%error, "failed to delete records"))?;

		if deleted_count == 0 {
			return Err(Error::NoneDeleted);
		}

		info!(deleted_count, "deleted records");

		Ok(Response { deleted_count })
	}
}

/// Request for deleting records.
///
/// `ids` is kept untyped so that a missing or malformed list can be reported as such instead of
/// as an unparsable request body.
#[derive(Debug, Default, Deserialize)]
pub struct Request
{
	#[serde(default)]
	pub ids: Option<Value>,
}

/// Response for deleting records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response
{
	pub deleted_count: u64,
}

/// Errors that can occur when deleting records.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Invalid or empty list of IDs")]
	InvalidIdList,

	#[error("No valid IDs provided")]
	NoValidIds,

	#[error("No records found for the provided IDs")]
	NoneDeleted,

	#[error("Error deleting records: {0}")]
	Database(#[from] DatabaseError),
}

impl AsProblemDetails for Error
{
	type ProblemType = Problem;

	fn problem_type(&self) -> Self::ProblemType
	{
		match self {
			Self::InvalidIdList => Problem::InvalidIdList,
			Self::NoValidIds => Problem::NoValidIds,
			Self::NoneDeleted => Problem::ResourceNotFound,
			Self::Database(_) => Problem::Internal,
		}
	}
}

impl_into_response!(Error);
