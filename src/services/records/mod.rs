//! A service to manage records.
//!
//! Every operation lives in its own module, named after what it does, and is implemented as a
//! method on [`RecordService`].

use std::sync::Arc;

use derive_more::Constructor;

mod models;
pub use models::{
	DeleteAck,
	Document,
	InsertManyAck,
	InsertOneAck,
	RecordFields,
	UpdateAck,
};

mod record_id;
pub use record_id::{ParseRecordIdError, RecordId};

mod filter;
pub use filter::RecordFilter;

mod store;
pub use store::{MongoStore, RecordStore, UpdateOutcome};

pub mod health;
pub mod upload_records;
pub mod get_records;
pub mod get_record;
pub mod create_record;
pub mod update_record;
pub mod delete_records;
pub mod delete_record;
pub mod http;

#[cfg(test)]
mod tests;

/// A service to manage records.
#[derive(Debug, Clone, Constructor)]
pub struct RecordService
{
	store: Arc<dyn RecordStore>,
}
