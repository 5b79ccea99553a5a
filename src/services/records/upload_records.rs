//! This module implements functionality to insert a batch of arbitrary documents.

use problem_details::AsProblemDetails;
use serde::Serialize;

use super::{Document, InsertManyAck, RecordService};
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Inserts every document in `documents` as a new record.
	///
	/// Identifiers are always assigned by the store, so any `_id` the client included is dropped.
	#[instrument(skip(documents), fields(documents.count = documents.len()), err(Debug, level = "debug"))]
	pub async fn upload_records(&self, mut documents: Vec<Document>) -> Result
	{
		if documents.is_empty() {
			return Err(Error::NoData);
		}

		for (idx, document) in documents.iter_mut().enumerate() {
			if let Some(id) = document.remove("_id") {
				debug!(idx, %id, "dropping client-supplied ID");
			}
		}

		let inserted_ids = self
			.store
			.insert_many(documents)
			.await
			.inspect_err(|error| error!(%error, "failed to insert records"))?;

		info!(count = inserted_ids.len(), "uploaded records");

		Ok(Response {
			message: "Data uploaded successfully",
			result: InsertManyAck {
				acknowledged: true,
				inserted_count: inserted_ids.len(),
				inserted_ids,
			},
		})
	}
}

/// Response for uploading records.
#[derive(Debug, Serialize)]
pub struct Response
{
	pub message: &'static str,
	pub result: InsertManyAck,
}

/// Errors that can occur when uploading records.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("No data provided")]
	NoData,

	#[error("Error inserting data: {0}")]
	Database(#[from] DatabaseError),
}

impl AsProblemDetails for Error
{
	type ProblemType = Problem;

	fn problem_type(&self) -> Self::ProblemType
	{
		match self {
			Self::NoData => Problem::NoDataProvided,
			Self::Database(_) => Problem::Internal,
		}
	}
}

impl_into_response!(Error);
