use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordId;

/// A semi-structured record as it is stored.
///
/// Documents returned by the store carry their identifier as a hex string under `_id`.
pub type Document = serde_json::Map<String, Value>;

/// The fields of a record that can be set explicitly.
///
/// Anything else submitted alongside these is dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordFields
{
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub level: Option<String>,
}

impl RecordFields
{
	/// Returns whether none of the fields are set.
	pub fn is_empty(&self) -> bool
	{
		self.name.is_none() && self.position.is_none() && self.level.is_none()
	}

	/// Turns the fields that are set into a document.
	///
	/// Missing fields are left out instead of being stored as `null`.
	pub fn into_document(self) -> Document
	{
		[("name", self.name), ("position", self.position), ("level", self.level)]
			.into_iter()
			.filter_map(|(key, value)| Some((String::from(key), Value::String(value?))))
			.collect()
	}
}

/// Acknowledgment for inserting a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneAck
{
	pub acknowledged: bool,
	pub inserted_id: RecordId,
}

/// Acknowledgment for inserting a batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertManyAck
{
	pub acknowledged: bool,
	pub inserted_count: usize,
	pub inserted_ids: Vec<RecordId>,
}

/// Acknowledgment for updating a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck
{
	pub acknowledged: bool,
	pub matched_count: u64,
	pub modified_count: u64,
}

/// Acknowledgment for deleting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck
{
	pub acknowledged: bool,
	pub deleted_count: u64,
}
