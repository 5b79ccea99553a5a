use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use super::RecordService;
use crate::config::{HttpConfig, TracingConfig};
use crate::testing::{self, MemoryStore, assert, assert_eq, assert_matches};

type App = NormalizePath<Router>;

fn setup() -> (Arc<MemoryStore>, App)
{
	let store = Arc::new(MemoryStore::default());
	let record_service = RecordService::new(Arc::<MemoryStore>::clone(&store));
	let router =
		crate::http::service(record_service, &HttpConfig::default(), &TracingConfig::default());

	(store, router)
}

async fn send(
	router: &App,
	method: Method,
	uri: &str,
	body: Option<Value>,
) -> testing::Result<(StatusCode, Value)>
{
	let mut request = http::Request::builder().method(method).uri(uri);

	let body = match body {
		Some(body) => {
			request = request.header(header::CONTENT_TYPE, "application/json");
			Body::from(serde_json::to_vec(&body)?)
		}
		None => Body::empty(),
	};

	let response = router.clone().oneshot(request.body(body)?).await?;
	let status = response.status();
	let json = testing::json_body(response.into_body()).await?;

	Ok((status, json))
}

async fn create(router: &App, fields: Value) -> testing::Result<String>
{
	let (status, ack) = send(router, Method::POST, "/record", Some(fields)).await?;

	assert_eq!(status, StatusCode::OK);

	let Some(id) = ack["insertedId"].as_str() else {
		anyhow::bail!("missing `insertedId` in {ack}");
	};

	Ok(String::from(id))
}

fn names(records: &Value) -> Vec<&str>
{
	records
		.as_array()
		.into_iter()
		.flatten()
		.filter_map(|record| record["name"].as_str())
		.collect()
}

fn assert_problem(body: &Value, slug: &str, detail: &str) -> testing::Result
{
	assert_eq!(body["type"], json!(format!("/problems/{slug}")));
	assert_eq!(body["detail"], json!(detail));

	Ok(())
}

/// Storage error messages depend on the backend, so only the prefix is fixed.
fn assert_internal(status: StatusCode, body: &Value, detail_prefix: &str) -> testing::Result
{
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["type"], json!("/problems/internal"));
	assert_matches!(body["detail"].as_str(), Some(detail) if detail.starts_with(detail_prefix));

	Ok(())
}

#[tokio::test]
async fn upload_inserts_every_document() -> testing::Result
{
	let (store, router) = setup();
	let documents = json!([
		{ "name": "Ana", "position": "Engineer", "level": "junior" },
		{ "name": "Ben", "position": "Designer", "level": "senior", "team": "web" },
		{ "name": "Cleo" },
	]);

	let (status, body) = send(&router, Method::POST, "/record/upload", Some(documents)).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], json!("Data uploaded successfully"));
	assert_eq!(body["result"]["acknowledged"], json!(true));
	assert_eq!(body["result"]["insertedCount"], json!(3));
	assert_matches!(body["result"]["insertedIds"].as_array(), Some(ids) if ids.len() == 3);
	assert_eq!(store.len(), 3);

	let (_, records) = send(&router, Method::GET, "/record", None).await?;

	assert_eq!(names(&records), ["Ana", "Ben", "Cleo"]);
	assert_eq!(records[1]["team"], json!("web"));

	Ok(())
}

#[tokio::test]
async fn upload_without_data_is_rejected() -> testing::Result
{
	let (store, router) = setup();

	for body in [json!([]), Value::Null] {
		let (status, problem) = send(&router, Method::POST, "/record/upload", Some(body)).await?;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_problem(&problem, "no-data-provided", "No data provided")?;
	}

	let (status, problem) = send(&router, Method::POST, "/record/upload", None).await?;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(problem["type"], json!("/problems/missing-header"));
	assert_eq!(store.len(), 0);

	Ok(())
}

#[tokio::test]
async fn upload_ignores_client_supplied_ids() -> testing::Result
{
	let (_, router) = setup();
	let documents = json!([{ "_id": "65f1c0ffee0000000000beef", "name": "Ana" }]);

	let (status, body) = send(&router, Method::POST, "/record/upload", Some(documents)).await?;

	assert_eq!(status, StatusCode::OK);
	assert!(body["result"]["insertedIds"][0] != json!("65f1c0ffee0000000000beef"));

	Ok(())
}

#[tokio::test]
async fn malformed_body_reports_position() -> testing::Result
{
	let (_, router) = setup();
	let request = http::Request::builder()
		.method(Method::POST)
		.uri("/record")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{\n  \"name\": }"))?;

	let response = router.oneshot(request).await?;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(
		response.headers().get(header::CONTENT_TYPE),
		Some(&http::HeaderValue::from_static(problem_details::CONTENT_TYPE)),
	);

	let problem = testing::json_body(response.into_body()).await?;

	assert_eq!(problem["type"], json!("/problems/invalid-request-body"));
	assert_eq!(problem["status"], json!(400));
	assert_eq!(problem["line"], json!(2));

	Ok(())
}

#[tokio::test]
async fn created_records_can_be_fetched() -> testing::Result
{
	let (_, router) = setup();
	let id = create(&router, json!({
		"name": "Ana",
		"position": "Engineer",
		"level": "junior",
		"salary": 100000,
	}))
	.await?;

	let (status, record) = send(&router, Method::GET, &format!("/record/{id}"), None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(record, json!({
		"_id": id,
		"name": "Ana",
		"position": "Engineer",
		"level": "junior",
	}));

	Ok(())
}

#[tokio::test]
async fn missing_fields_are_not_stored() -> testing::Result
{
	let (_, router) = setup();
	let id = create(&router, json!({ "name": "Ana" })).await?;

	let (_, record) = send(&router, Method::GET, &format!("/record/{id}"), None).await?;

	assert_eq!(record, json!({ "_id": id, "name": "Ana" }));

	Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() -> testing::Result
{
	let (_, router) = setup();

	for id in ["65f1c0ffee0000000000beef", "not-an-id"] {
		let uri = format!("/record/{id}");

		let (status, problem) = send(&router, Method::GET, &uri, None).await?;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_problem(&problem, "resource-not-found", "Not found")?;

		let (status, problem) =
			send(&router, Method::PATCH, &uri, Some(json!({ "name": "Ana" }))).await?;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_problem(&problem, "resource-not-found", "Not found")?;

		let (status, problem) = send(&router, Method::DELETE, &uri, None).await?;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_problem(&problem, "resource-not-found", "Not found")?;
	}

	Ok(())
}

#[tokio::test]
async fn search_matches_name_or_position() -> testing::Result
{
	let (_, router) = setup();

	create(&router, json!({ "name": "Alice Smith", "position": "Engineer" })).await?;
	create(&router, json!({ "name": "Bob", "position": "Assistant to ALICE" })).await?;
	create(&router, json!({ "name": "Carol", "position": "Designer" })).await?;

	let (status, records) = send(&router, Method::GET, "/record?search=alice", None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(names(&records), ["Alice Smith", "Bob"]);

	let (_, records) = send(&router, Method::GET, "/record?search=xyz", None).await?;

	assert_eq!(records, json!([]));

	Ok(())
}

#[tokio::test]
async fn filter_restricts_levels() -> testing::Result
{
	let (_, router) = setup();

	create(&router, json!({ "name": "Ana", "position": "Engineer", "level": "junior" })).await?;
	create(&router, json!({ "name": "Ben", "position": "Engineer", "level": "senior" })).await?;
	create(&router, json!({ "name": "Cleo", "position": "Engineer", "level": "lead" })).await?;
	create(&router, json!({ "name": "Dan", "position": "Designer", "level": "junior" })).await?;

	let (_, records) = send(&router, Method::GET, "/record?filter=junior,senior", None).await?;
	assert_eq!(names(&records), ["Ana", "Ben", "Dan"]);

	let (_, records) =
		send(&router, Method::GET, "/record?search=engineer&filter=junior,lead", None).await?;
	assert_eq!(names(&records), ["Ana", "Cleo"]);

	let (_, records) = send(&router, Method::GET, "/record?filter=", None).await?;
	assert_eq!(names(&records).len(), 4);

	Ok(())
}

#[tokio::test]
async fn empty_filter_segments_match_empty_levels() -> testing::Result
{
	let (_, router) = setup();

	create(&router, json!({ "name": "Ana", "level": "junior" })).await?;
	create(&router, json!({ "name": "Ben", "level": "" })).await?;
	create(&router, json!({ "name": "Cleo" })).await?;

	let (status, records) = send(&router, Method::GET, "/record?filter=,", None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(names(&records), ["Ben"]);

	let (_, records) = send(&router, Method::GET, "/record?filter=junior,", None).await?;
	assert_eq!(names(&records), ["Ana", "Ben"]);

	Ok(())
}

#[tokio::test]
async fn trailing_slash_is_ignored() -> testing::Result
{
	let (store, router) = setup();

	let (status, ack) =
		send(&router, Method::POST, "/record/", Some(json!({ "name": "Ana" }))).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ack["acknowledged"], json!(true));
	assert_eq!(store.len(), 1);

	let (status, records) = send(&router, Method::GET, "/record/", None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(names(&records), ["Ana"]);

	let Some(id) = ack["insertedId"].as_str() else {
		anyhow::bail!("missing `insertedId` in {ack}");
	};

	let (status, record) = send(&router, Method::GET, &format!("/record/{id}/"), None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(record["name"], json!("Ana"));

	Ok(())
}

#[tokio::test]
async fn updates_are_partial() -> testing::Result
{
	let (_, router) = setup();
	let id = create(&router, json!({ "name": "Ana", "position": "Engineer", "level": "junior" }))
		.await?;
	let uri = format!("/record/{id}");

	let (status, ack) = send(&router, Method::PATCH, &uri, Some(json!({ "level": "senior" }))).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ack, json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 }));

	let (_, record) = send(&router, Method::GET, &uri, None).await?;

	assert_eq!(record, json!({
		"_id": id,
		"name": "Ana",
		"position": "Engineer",
		"level": "senior",
	}));

	let (status, ack) = send(&router, Method::PATCH, &uri, Some(json!({}))).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ack["modifiedCount"], json!(0));

	Ok(())
}

#[tokio::test]
async fn bulk_delete_validates_ids() -> testing::Result
{
	let (store, router) = setup();

	create(&router, json!({ "name": "Ana" })).await?;

	for body in [json!({ "ids": [] }), json!({ "ids": "65f1c0ffee0000000000beef" }), json!({})] {
		let (status, problem) = send(&router, Method::DELETE, "/record/delete", Some(body)).await?;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_problem(&problem, "invalid-id-list", "Invalid or empty list of IDs")?;
	}

	let body = json!({ "ids": ["nope", 42, null] });
	let (status, problem) = send(&router, Method::DELETE, "/record/delete", Some(body)).await?;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_problem(&problem, "no-valid-ids", "No valid IDs provided")?;

	let body = json!({ "ids": ["nope", "65f1c0ffee0000000000beef"] });
	let (status, problem) = send(&router, Method::DELETE, "/record/delete", Some(body)).await?;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_problem(&problem, "resource-not-found", "No records found for the provided IDs")?;
	assert_eq!(store.len(), 1);

	Ok(())
}

#[tokio::test]
async fn bulk_delete_removes_matching_records() -> testing::Result
{
	let (store, router) = setup();
	let ana = create(&router, json!({ "name": "Ana" })).await?;
	let ben = create(&router, json!({ "name": "Ben" })).await?;
	create(&router, json!({ "name": "Cleo" })).await?;

	let body = json!({ "ids": [ana, ben, "not-an-id"] });
	let (status, body) = send(&router, Method::DELETE, "/record/delete", Some(body)).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "deletedCount": 2 }));
	assert_eq!(store.len(), 1);

	for id in [ana, ben] {
		let (status, _) = send(&router, Method::GET, &format!("/record/{id}"), None).await?;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	Ok(())
}

#[tokio::test]
async fn create_list_delete_lifecycle() -> testing::Result
{
	let (_, router) = setup();
	let id = create(&router, json!({ "name": "Ana", "position": "Engineer", "level": "junior" }))
		.await?;

	let (_, records) = send(&router, Method::GET, "/record?filter=junior", None).await?;
	assert_eq!(names(&records), ["Ana"]);

	let uri = format!("/record/{id}");
	let (status, ack) = send(&router, Method::DELETE, &uri, None).await?;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ack, json!({ "acknowledged": true, "deletedCount": 1 }));

	let (status, _) = send(&router, Method::GET, &uri, None).await?;
	assert_eq!(status, StatusCode::NOT_FOUND);

	Ok(())
}

#[tokio::test]
async fn storage_failures_are_internal_errors() -> testing::Result
{
	let (store, router) = setup();
	let id = create(&router, json!({ "name": "Ana" })).await?;
	let uri = format!("/record/{id}");

	store.fail();

	let (status, problem) =
		send(&router, Method::POST, "/record", Some(json!({ "name": "Ben" }))).await?;
	assert_internal(status, &problem, "Error adding record: ")?;

	let body = json!([{ "name": "Ben" }]);
	let (status, problem) = send(&router, Method::POST, "/record/upload", Some(body)).await?;
	assert_internal(status, &problem, "Error inserting data: ")?;

	let (status, problem) = send(&router, Method::GET, "/record", None).await?;
	assert_internal(status, &problem, "Error fetching records: ")?;

	let (status, problem) = send(&router, Method::GET, &uri, None).await?;
	assert_internal(status, &problem, "Error fetching record: ")?;

	let (status, problem) =
		send(&router, Method::PATCH, &uri, Some(json!({ "name": "Ben" }))).await?;
	assert_internal(status, &problem, "Error updating record: ")?;

	let (status, problem) = send(&router, Method::DELETE, &uri, None).await?;
	assert_internal(status, &problem, "Error deleting record: ")?;

	let body = json!({ "ids": [id] });
	let (status, problem) = send(&router, Method::DELETE, "/record/delete", Some(body)).await?;
	assert_internal(status, &problem, "Error deleting records: ")?;

	assert_eq!(store.len(), 1);

	Ok(())
}

#[tokio::test]
async fn health_check_pings_store() -> testing::Result
{
	let (store, router) = setup();
	let request = || http::Request::get("/health").body(Body::empty());

	let response = router.clone().oneshot(request()?).await?;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().contains_key("x-request-id"));
	assert_eq!(response.into_body().collect().await?.to_bytes(), "ok");

	store.fail();

	let response = router.oneshot(request()?).await?;

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	Ok(())
}
