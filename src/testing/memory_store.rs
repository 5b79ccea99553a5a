use std::sync::Mutex;
use std::sync::atomic::{self, AtomicBool};

use mongodb::bson::Bson;
use serde_json::Value;

use crate::database::{DatabaseError, DatabaseResult};
use crate::services::records::{Document, RecordFilter, RecordId, RecordStore, UpdateOutcome};

/// An in-memory [`RecordStore`].
///
/// Records are kept in insertion order. Every operation can be made to fail with
/// [`MemoryStore::fail()`].
#[derive(Debug, Default)]
pub(crate) struct MemoryStore
{
	records: Mutex<Vec<(RecordId, Document)>>,
	failing: AtomicBool,
}

impl MemoryStore
{
	/// Makes every subsequent operation fail.
	pub(crate) fn fail(&self)
	{
		self.failing.store(true, atomic::Ordering::SeqCst);
	}

	/// Returns the number of stored records.
	pub(crate) fn len(&self) -> usize
	{
		self.records().len()
	}

	fn records(&self) -> std::sync::MutexGuard<'_, Vec<(RecordId, Document)>>
	{
		self.records
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn check(&self) -> DatabaseResult<()>
	{
		if self.failing.load(atomic::Ordering::SeqCst) {
			let reason = Bson::String(String::from("simulated storage failure"));
			return Err(DatabaseError::UnexpectedValue(reason));
		}

		Ok(())
	}
}

fn with_id(id: RecordId, document: &Document) -> Document
{
	let mut document = document.clone();
	document.insert(String::from("_id"), Value::String(id.to_string()));
	document
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore
{
	async fn ping(&self) -> DatabaseResult<()>
	{
		self.check()
	}

	async fn insert_one(&self, document: Document) -> DatabaseResult<RecordId>
	{
		self.check()?;

		let id = RecordId::new();
		self.records().push((id, document));

		Ok(id)
	}

	async fn insert_many(&self, documents: Vec<Document>) -> DatabaseResult<Vec<RecordId>>
	{
		self.check()?;

		let mut records = self.records();

		Ok(documents
			.into_iter()
			.map(|document| {
				let id = RecordId::new();
				records.push((id, document));
				id
			})
			.collect())
	}

	async fn find(&self, filter: &RecordFilter) -> DatabaseResult<Vec<Document>>
	{
		self.check()?;

		Ok(self
			.records()
			.iter()
			.filter(|(_, document)| filter.matches(document))
			.map(|(id, document)| with_id(*id, document))
			.collect())
	}

	async fn find_one(&self, id: RecordId) -> DatabaseResult<Option<Document>>
	{
		self.check()?;

		Ok(self
			.records()
			.iter()
			.find(|(record_id, _)| *record_id == id)
			.map(|(id, document)| with_id(*id, document)))
	}

	async fn update_one(&self, id: RecordId, changes: Document) -> DatabaseResult<UpdateOutcome>
	{
		self.check()?;

		let mut records = self.records();
		let Some((_, document)) = records.iter_mut().find(|(record_id, _)| *record_id == id) else {
			return Ok(UpdateOutcome { matched: 0, modified: 0 });
		};

		let mut modified = false;

		for (key, value) in changes {
			if document.get(&key) != Some(&value) {
				document.insert(key, value);
				modified = true;
			}
		}

		Ok(UpdateOutcome { matched: 1, modified: u64::from(modified) })
	}

	async fn delete_one(&self, id: RecordId) -> DatabaseResult<u64>
	{
		self.check()?;

		let mut records = self.records();
		let Some(idx) = records.iter().position(|(record_id, _)| *record_id == id) else {
			return Ok(0);
		};

		records.remove(idx);

		Ok(1)
	}

	async fn delete_many(&self, ids: &[RecordId]) -> DatabaseResult<u64>
	{
		self.check()?;

		let mut records = self.records();
		let before = records.len();

		records.retain(|(id, _)| !ids.contains(id));

		Ok((before - records.len()) as u64)
	}
}
