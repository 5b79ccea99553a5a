//! Storage for records.

use std::fmt;

use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, doc};
use mongodb::{Collection, Database};
use serde_json::Value;

use super::{Document, RecordFilter, RecordId};
use crate::database::{DatabaseError, DatabaseResult};

/// A collection of records.
///
/// The service holds a single shared instance of this for its entire lifetime.
#[async_trait::async_trait]
pub trait RecordStore: fmt::Debug + Send + Sync + 'static
{
	/// Checks whether the store is reachable.
	async fn ping(&self) -> DatabaseResult<()>;

	/// Inserts a single document and returns the ID it was assigned.
	async fn insert_one(&self, document: Document) -> DatabaseResult<RecordId>;

	/// Inserts a batch of documents and returns the IDs they were assigned, in order.
	async fn insert_many(&self, documents: Vec<Document>) -> DatabaseResult<Vec<RecordId>>;

	/// Returns every document matching `filter`, in natural storage order.
	async fn find(&self, filter: &RecordFilter) -> DatabaseResult<Vec<Document>>;

	/// Returns the document with the given `id`, if any.
	async fn find_one(&self, id: RecordId) -> DatabaseResult<Option<Document>>;

	/// Sets the fields in `changes` on the document with the given `id`.
	async fn update_one(&self, id: RecordId, changes: Document) -> DatabaseResult<UpdateOutcome>;

	/// Deletes the document with the given `id` and returns how many documents were deleted.
	async fn delete_one(&self, id: RecordId) -> DatabaseResult<u64>;

	/// Deletes every document whose ID is in `ids` and returns how many were deleted.
	async fn delete_many(&self, ids: &[RecordId]) -> DatabaseResult<u64>;
}

/// The result of [`RecordStore::update_one()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome
{
	/// How many documents matched the ID.
	pub matched: u64,

	/// How many documents were actually changed.
	pub modified: u64,
}

/// A [`RecordStore`] backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoStore
{
	database: Database,
	collection: Collection<bson::Document>,
}

impl MongoStore
{
	/// Creates a new store for the collection called `name` in `database`.
	pub fn new(database: &Database, name: &str) -> Self
	{
		Self {
			database: database.clone(),
			collection: database.collection(name),
		}
	}
}

#[async_trait::async_trait]
impl RecordStore for MongoStore
{
	async fn ping(&self) -> DatabaseResult<()>
	{
		self.database
			.run_command(doc! { "ping": 1 })
			.await?;

		Ok(())
	}

	async fn insert_one(&self, document: Document) -> DatabaseResult<RecordId>
	{
		let result = self.collection.insert_one(to_bson(document)).await?;

		to_record_id(result.inserted_id)
	}

	async fn insert_many(&self, documents: Vec<Document>) -> DatabaseResult<Vec<RecordId>>
	{
		let documents = documents.into_iter().map(to_bson).collect::<Vec<_>>();
		let mut inserted_ids = self
			.collection
			.insert_many(documents)
			.await?
			.inserted_ids
			.into_iter()
			.collect::<Vec<_>>();

		inserted_ids.sort_unstable_by_key(|&(idx, _)| idx);
		inserted_ids
			.into_iter()
			.map(|(_, id)| to_record_id(id))
			.collect()
	}

	async fn find(&self, filter: &RecordFilter) -> DatabaseResult<Vec<Document>>
	{
		let documents = self
			.collection
			.find(filter_document(filter))
			.await?
			.try_collect::<Vec<_>>()
			.await?;

		Ok(documents.into_iter().map(to_json).collect())
	}

	async fn find_one(&self, id: RecordId) -> DatabaseResult<Option<Document>>
	{
		let document = self
			.collection
			.find_one(doc! { "_id": *id.as_object_id() })
			.await?;

		Ok(document.map(to_json))
	}

	async fn update_one(&self, id: RecordId, changes: Document) -> DatabaseResult<UpdateOutcome>
	{
		let result = self
			.collection
			.update_one(doc! { "_id": *id.as_object_id() }, doc! { "$set": to_bson(changes) })
			.await?;

		Ok(UpdateOutcome {
			matched: result.matched_count,
			modified: result.modified_count,
		})
	}

	async fn delete_one(&self, id: RecordId) -> DatabaseResult<u64>
	{
		let result = self
			.collection
			.delete_one(doc! { "_id": *id.as_object_id() })
			.await?;

		Ok(result.deleted_count)
	}

	async fn delete_many(&self, ids: &[RecordId]) -> DatabaseResult<u64>
	{
		let ids = ids
			.iter()
			.map(|id| Bson::ObjectId(*id.as_object_id()))
			.collect::<Vec<_>>();

		let result = self
			.collection
			.delete_many(doc! { "_id": { "$in": ids } })
			.await?;

		Ok(result.deleted_count)
	}
}

/// Builds the query document for `filter`.
fn filter_document(filter: &RecordFilter) -> bson::Document
{
	let mut query = bson::Document::new();

	if let Some(search) = filter.search() {
		let pattern = regex::escape(search);

		query.insert("$or", vec![
			doc! { "name": { "$regex": pattern.as_str(), "$options": "i" } },
			doc! { "position": { "$regex": pattern.as_str(), "$options": "i" } },
		]);
	}

	if !filter.levels().is_empty() {
		query.insert("level", doc! { "$in": filter.levels().to_vec() });
	}

	query
}

/// Converts a JSON document into BSON.
///
/// Keys such as `$oid` or `$numberLong` are stored as ordinary fields; client data is never read
/// as extended JSON.
fn to_bson(document: Document) -> bson::Document
{
	document
		.into_iter()
		.map(|(key, value)| (key, to_bson_value(value)))
		.collect()
}

fn to_bson_value(value: Value) -> Bson
{
	match value {
		Value::Null => Bson::Null,
		Value::Bool(value) => Bson::Boolean(value),
		Value::Number(number) => {
			if let Some(n) = number.as_i64() {
				i32::try_from(n).map_or(Bson::Int64(n), Bson::Int32)
			} else if let Some(n) = number.as_f64() {
				Bson::Double(n)
			} else {
				Bson::String(number.to_string())
			}
		}
		Value::String(value) => Bson::String(value),
		Value::Array(values) => Bson::Array(values.into_iter().map(to_bson_value).collect()),
		Value::Object(document) => Bson::Document(to_bson(document)),
	}
}

/// Converts a BSON document into relaxed extended JSON, with `_id` as a plain hex string.
fn to_json(mut document: bson::Document) -> Document
{
	let id = document.remove("_id");
	let Value::Object(mut json) = Bson::Document(document).into_relaxed_extjson() else {
		unreachable!("BSON documents always turn into JSON objects");
	};

	match id {
		Some(Bson::ObjectId(id)) => {
			json.insert(String::from("_id"), Value::String(id.to_hex()));
		}
		Some(id) => {
			json.insert(String::from("_id"), id.into_relaxed_extjson());
		}
		None => {}
	}

	json
}

fn to_record_id(id: Bson) -> DatabaseResult<RecordId>
{
	match id {
		Bson::ObjectId(id) => Ok(RecordId::from(id)),
		other => Err(DatabaseError::UnexpectedValue(other)),
	}
}
