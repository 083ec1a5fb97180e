//! Integration tests for widgets backed by a collection endpoint.

mod common;

use common::{BASE_URL, FakeEndpoint};
use rest_admin_core::list::{row_ids, summary_texts};
use rest_admin_core::transport::Method;
use rest_admin_core::{ActionOverrides, AdminOptions, ReorderOutcome, RestAdmin};
use rest_admin_types::{
	AdminError, Collection, Column, NestedOptions, Record, TransportError, Value,
};
use rstest::*;
use serde_json::json;

#[fixture]
fn endpoint() -> FakeEndpoint {
	FakeEndpoint::with_records(vec![
		json!({"id": 1, "title": "First"}),
		json!({"id": 2, "title": "Second"}),
	])
}

fn options(endpoint: &FakeEndpoint) -> AdminOptions {
	AdminOptions::new(vec![Column::new("title", "text").required(true)])
		.with_url(format!("{}/", BASE_URL))
		.with_sortable(true)
		.with_transport(endpoint.clone())
}

#[rstest]
#[tokio::test]
async fn test_mount_fetches_collection(endpoint: FakeEndpoint) {
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	assert!(!admin.is_local());
	assert_eq!(endpoint.requests(), vec![(Method::Get, BASE_URL.to_string())]);
	assert_eq!(row_ids(admin.current_view()), vec!["1", "2"]);
}

#[rstest]
#[tokio::test]
async fn test_initial_data_skips_fetch(endpoint: FakeEndpoint) {
	let data = Collection::from_records(vec![Record::new().with("id", 7).with("title", "Cached")]);
	let mut admin = RestAdmin::new(options(&endpoint).with_data(data)).unwrap();
	admin.mount().await.unwrap();

	assert!(endpoint.requests().is_empty());
	assert_eq!(summary_texts(admin.current_view()), vec![vec!["Cached".to_string()]]);
}

#[rstest]
#[tokio::test]
async fn test_every_mutation_refetches(endpoint: FakeEndpoint) {
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	admin.new_record().unwrap();
	admin
		.session_mut()
		.unwrap()
		.control_mut("title")
		.unwrap()
		.set_text("Third")
		.unwrap();
	let created = admin.save().await.unwrap();
	assert_eq!(created.value("id"), Value::from(3));

	admin.edit(&Value::from(1)).unwrap();
	admin
		.session_mut()
		.unwrap()
		.control_mut("title")
		.unwrap()
		.set_text("Updated")
		.unwrap();
	admin.save().await.unwrap();

	assert_eq!(
		endpoint.requests(),
		vec![
			(Method::Get, BASE_URL.to_string()),
			(Method::Post, BASE_URL.to_string()),
			(Method::Get, BASE_URL.to_string()),
			(Method::Put, format!("{}/1", BASE_URL)),
			(Method::Get, BASE_URL.to_string()),
		]
	);
	assert_eq!(
		summary_texts(admin.current_view()),
		vec![
			vec!["Updated".to_string()],
			vec!["Second".to_string()],
			vec!["Third".to_string()],
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_failed_delete_keeps_record(endpoint: FakeEndpoint) {
	endpoint.fail(Method::Delete);
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	admin.edit(&Value::from(2)).unwrap();
	let err = admin.delete().await.unwrap_err();

	assert!(matches!(
		err,
		AdminError::Transport(TransportError::Status { status: 500, .. })
	));
	assert!(admin.is_editing());
	assert_eq!(admin.collection().len(), 2);
	assert_eq!(endpoint.records().len(), 2);
	admin.cancel().unwrap();
	assert_eq!(row_ids(admin.current_view()), vec!["1", "2"]);
}

#[rstest]
#[tokio::test]
async fn test_failed_save_keeps_session_open(endpoint: FakeEndpoint) {
	endpoint.fail(Method::Post);
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	admin.new_record().unwrap();
	admin
		.session_mut()
		.unwrap()
		.control_mut("title")
		.unwrap()
		.set_text("Lost")
		.unwrap();
	assert!(matches!(admin.save().await, Err(AdminError::Transport(_))));
	assert!(admin.session().unwrap().is_new());
	assert_eq!(endpoint.count(Method::Get), 1);
}

#[rstest]
#[tokio::test]
async fn test_validation_never_reaches_endpoint(endpoint: FakeEndpoint) {
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	admin.new_record().unwrap();
	assert!(matches!(admin.save().await, Err(AdminError::Validation(_))));
	assert_eq!(endpoint.count(Method::Post), 0);
}

#[rstest]
#[tokio::test]
async fn test_reorder_applied_and_reverted(endpoint: FakeEndpoint) {
	let mut admin = RestAdmin::new(options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	assert_eq!(admin.move_row(1, 0).await.unwrap(), ReorderOutcome::Applied);
	assert_eq!(row_ids(admin.current_view()), vec!["2", "1"]);
	assert!(
		endpoint
			.requests()
			.contains(&(Method::Put, format!("{}/rank", BASE_URL)))
	);

	endpoint.fail(Method::Put);
	assert_eq!(admin.move_row(1, 0).await.unwrap(), ReorderOutcome::Reverted);
	assert_eq!(row_ids(admin.current_view()), vec!["2", "1"]);
}

#[rstest]
#[tokio::test]
async fn test_load_override_replaces_fetch(endpoint: FakeEndpoint) {
	let overrides = ActionOverrides::new().load_data(|| async {
		Ok(vec![Record::new().with("id", "x").with("title", "From override")])
	});
	let mut admin = RestAdmin::new(options(&endpoint).with_actions(overrides)).unwrap();
	admin.mount().await.unwrap();

	assert_eq!(endpoint.count(Method::Get), 0);
	assert_eq!(
		summary_texts(admin.current_view()),
		vec![vec!["From override".to_string()]]
	);
}

fn box_options(endpoint: &FakeEndpoint) -> AdminOptions {
	AdminOptions::new(vec![
		Column::new("title", "text").required(true),
		Column::new("items", "admin")
			.label_column("name")
			.default_value(Value::from(json!([])))
			.nested(NestedOptions::new(vec![Column::new("name", "text")])),
	])
	.with_url(BASE_URL)
	.with_transport(endpoint.clone())
}

async fn add_item(admin: &mut RestAdmin, name: &str) {
	let nested = admin
		.session_mut()
		.unwrap()
		.control_mut("items")
		.unwrap()
		.nested_mut()
		.unwrap();
	nested.new_record().unwrap();
	nested
		.session_mut()
		.unwrap()
		.control_mut("name")
		.unwrap()
		.set_text(name)
		.unwrap();
	nested.save().await.unwrap();
}

fn item_names(record: &serde_json::Value) -> Vec<String> {
	record["items"]
		.as_array()
		.unwrap()
		.iter()
		.map(|item| item["name"].as_str().unwrap().to_string())
		.collect()
}

#[rstest]
#[tokio::test]
async fn test_nested_edits_reach_server_when_items_arrive_empty() {
	// Arrange
	let endpoint = FakeEndpoint::with_records(vec![json!({"id": 1, "title": "Box", "items": []})]);
	let mut admin = RestAdmin::new(box_options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	// Act
	admin.edit(&Value::from(1)).unwrap();
	add_item(&mut admin, "Bolt").await;
	admin.save().await.unwrap();

	// Assert
	let saved = &endpoint.records()[0];
	assert_eq!(item_names(saved), vec!["Bolt".to_string()]);
	assert!(saved["items"][0]["id"].as_str().unwrap().starts_with("_temp_"));
	assert_eq!(summary_texts(admin.current_view()), vec![vec!["Box".to_string(), "Bolt".to_string()]]);
}

#[rstest]
#[tokio::test]
async fn test_nested_edits_on_new_record_use_array_default() {
	// Arrange
	let endpoint = FakeEndpoint::with_records(Vec::new());
	let mut admin = RestAdmin::new(box_options(&endpoint)).unwrap();
	admin.mount().await.unwrap();

	// Act
	admin.new_record().unwrap();
	admin
		.session_mut()
		.unwrap()
		.control_mut("title")
		.unwrap()
		.set_text("Crate")
		.unwrap();
	add_item(&mut admin, "Nut").await;
	add_item(&mut admin, "Washer").await;
	admin.save().await.unwrap();

	// Assert
	assert_eq!(
		item_names(&endpoint.records()[0]),
		vec!["Nut".to_string(), "Washer".to_string()]
	);
}
