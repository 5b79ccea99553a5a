use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// The unique identifier of a record.
///
/// This is assigned by the database on creation and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(ObjectId);

impl RecordId
{
	/// Generates a new, unique ID.
	pub fn new() -> Self
	{
		Self(ObjectId::new())
	}

	/// Returns the underlying [`ObjectId`].
	pub fn as_object_id(&self) -> &ObjectId
	{
		&self.0
	}
}

impl Default for RecordId
{
	fn default() -> Self
	{
		Self::new()
	}
}

impl From<ObjectId> for RecordId
{
	fn from(object_id: ObjectId) -> Self
	{
		Self(object_id)
	}
}

impl fmt::Display for RecordId
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(&self.0.to_hex(), fmt)
	}
}

/// Error for parsing a string into a [`RecordId`].
#[derive(Debug, Error)]
#[error("`{0}` is not a valid record ID")]
pub struct ParseRecordIdError(Box<str>);

impl FromStr for RecordId
{
	type Err = ParseRecordIdError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		ObjectId::parse_str(value)
			.map(Self)
			.map_err(|_| ParseRecordIdError(Box::from(value)))
	}
}

impl Serialize for RecordId
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0.to_hex())
	}
}
