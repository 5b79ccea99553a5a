//! This module implements a health check for the underlying store.

use problem_details::AsProblemDetails;

use super::RecordService;
use crate::database::DatabaseError;
use crate::http::Problem;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Checks whether the store is reachable.
	#[instrument(err(Debug, level = "debug"))]
	pub async fn health(&self) -> Result
	{
		self.store
			.ping()
			.await
			.inspect_err(|error| error!(%error, "database is unreachable"))?;

		Ok(())
	}
}

/// Errors that can occur when checking the store's health.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("Database is unreachable: {0}")]
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
