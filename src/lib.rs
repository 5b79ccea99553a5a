//! The Records API.
//!
//! This crate implements an HTTP facade over a single document collection ("records") stored in
//! MongoDB.

/*
 * Records API
 *
 * Copyright (C) 2024  AlphaKeks <alphakeks@dawn>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

#[macro_use]
extern crate tracing as _;

#[macro_use]
extern crate thiserror as _;

#[cfg(test)]
mod testing;

#[macro_use]
mod macros;

mod extract;
mod middleware;
mod signals;
mod tracing;

pub mod config;
pub use config::Config;

pub mod database;
pub mod http;
pub mod services;

/// Runs the HTTP server.
///
/// This will connect to the database, bind a TCP socket, and serve requests until the process
/// receives SIGINT.
pub async fn run(config: Config) -> Result<(), RunError>
{
	http::problem::set_base_uri(&config.http.problem_base_uri);

	let tracing_guard = tracing::init(&config.tracing)?;

	info!(?config, "starting up");

	let database = database::connect(&config.database).await?;
	let record_store = services::records::MongoStore::new(&database, &config.database.collection);
	let record_service = services::RecordService::new(Arc::new(record_store));

	let service = axum::ServiceExt::<http::Request>::into_make_service_with_connect_info::<
		SocketAddr,
	>(http::service(record_service, &config.http, &config.tracing));

	let tcp_listener = tokio::net::TcpListener::bind(config.http.socket_addr()).await?;
	let addr = tcp_listener.local_addr()?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(signals::sigint())
		.await?;

	warn!("shutting down database client");
	database.client().clone().shutdown().await;

	drop(tracing_guard);

	Ok(())
}

/// Errors returned by [`run()`].
#[derive(Debug, Error)]
pub enum RunError
{
	/// We failed to establish a database connection.
	#[error("failed to establish database connection: {0}")]
	EstablishDatabaseConnection(#[from] database::DatabaseError),

	/// Some other I/O failure.
	#[error(transparent)]
	Io(#[from] io::Error),
}
