use mongodb::bson::Bson;

/// Result alias for storage operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors that can occur when talking to the database.
#[derive(Debug, Error)]
pub enum DatabaseError
{
	/// The driver reported an error.
	#[error(transparent)]
	Driver(#[from] mongodb::error::Error),

	/// The database returned a value of an unexpected type.
	#[error("unexpected value `{0}`")]
	UnexpectedValue(Bson),
}
