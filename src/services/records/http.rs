//! This module contains the HTTP handlers for the `/record` endpoint.

use axum::extract::State;
use axum::{Router, routing};

use super::{
	Document,
	RecordFields,
	RecordService,
	create_record,
	delete_record,
	delete_records,
	get_record,
	get_records,
	update_record,
	upload_records,
};
use crate::extract::{Json, Path, Query};

/// Returns a router for the `/record` endpoint.
pub fn router(record_service: RecordService) -> Router
{
	Router::new()
		.route("/upload", routing::post(upload_records))
		.route("/", routing::get(get_records).post(create_record))
		.route("/delete", routing::delete(delete_records))
		.route("/{id}", routing::get(get_record).patch(update_record).delete(delete_record))
		.with_state(record_service)
}

#[instrument(level = "debug", skip(documents), err(Debug, level = "debug"))]
async fn upload_records(
	State(record_service): State<RecordService>,
	Json(documents): Json<Option<Vec<Document>>>,
) -> upload_records::Result<Json<upload_records::Response>>
{
	record_service
		.upload_records(documents.unwrap_or_default())
		.await
		.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn get_records(
	State(record_service): State<RecordService>,
	Query(request): Query<get_records::Request>,
) -> get_records::Result<Json<get_records::Response>>
{
	record_service.get_records(request).await.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn create_record(
	State(record_service): State<RecordService>,
	Json(fields): Json<RecordFields>,
) -> create_record::Result<Json<create_record::Response>>
{
	record_service.create_record(fields).await.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn get_record(
	State(record_service): State<RecordService>,
	Path(id): Path<String>,
) -> get_record::Result<Json<get_record::Response>>
{
	record_service.get_record(&id).await.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn update_record(
	State(record_service): State<RecordService>,
	Path(id): Path<String>,
	Json(changes): Json<RecordFields>,
) -> update_record::Result<Json<update_record::Response>>
{
	record_service.update_record(&id, changes).await.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn delete_records(
	State(record_service): State<RecordService>,
	Json(request): Json<delete_records::Request>,
) -> delete_records::Result<Json<delete_records::Response>>
{
	record_service.delete_records(request).await.map(Json)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn delete_record(
	State(record_service): State<RecordService>,
	Path(id): Path<String>,
) -> delete_record::Result<Json<delete_record::Response>>
{
	record_service.delete_record(&id).await.map(Json)
}
