//! Database connection management.
//!
//! Records live in a single MongoDB collection. This module knows how to open a connection pool
//! from [`DatabaseConfig`]; everything collection-specific is implemented by
//! [`MongoStore`](crate::services::records::MongoStore).

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;

mod error;
pub use error::{DatabaseError, DatabaseResult};

/// Connects to the database described by `config`.
///
/// This verifies connectivity by issuing a `ping` command before returning.
#[instrument(err(Debug, level = "warn"))]
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Database>
{
	let mut options = ClientOptions::parse(&*config.url).await?;

	options.app_name = Some(String::from("records-api"));
	options.min_pool_size = Some(config.min_connections);

	if let Some(max_connections) = config.max_connections {
		options.max_pool_size = Some(max_connections.get());
	}

	let client = Client::with_options(options)?;
	let database = client.database(&config.name);

	database.run_command(doc! { "ping": 1 }).await?;

	info!(database = %config.name, "connected to database");

	Ok(database)
}
