//! Integration tests for widgets working on caller-owned data.

use rest_admin_core::list::summary_texts;
use rest_admin_core::{AdminOptions, DeleteOutcome, ReorderOutcome, RestAdmin};
use rest_admin_types::{
	AdminError, Collection, Column, NestedOptions, Record, TEMP_ID_PREFIX, Value, ViolationKind,
};
use rstest::*;

fn texts(admin: &RestAdmin) -> Vec<Vec<String>> {
	summary_texts(admin.current_view())
}

fn set_text(admin: &mut RestAdmin, column: &str, text: &str) {
	admin
		.session_mut()
		.unwrap()
		.control_mut(column)
		.unwrap()
		.set_text(text)
		.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_title_scenario() {
	// Arrange
	let data = Collection::new();
	let options = AdminOptions::new(vec![Column::new("title", "text").required(true)])
		.with_local(true)
		.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();

	// Act: create
	admin.new_record().unwrap();
	set_text(&mut admin, "title", "Hello");
	let created = admin.save().await.unwrap();

	// Assert
	assert_eq!(texts(&admin), vec![vec!["Hello".to_string()]]);
	assert!(
		created
			.value("id")
			.as_str()
			.unwrap()
			.starts_with(TEMP_ID_PREFIX)
	);

	// Act: blank the title
	admin.edit_row(0).unwrap();
	set_text(&mut admin, "title", "");
	let err = admin.save().await.unwrap_err();

	// Assert
	let failure = err.as_validation().unwrap();
	assert_eq!(failure.violations[0].kind, ViolationKind::Required);
	assert!(admin.session().unwrap().is_flagged("title"));
	assert_eq!(data.get(0).unwrap().value("title"), Value::from("Hello"));
	admin.cancel().unwrap();
	assert_eq!(texts(&admin), vec![vec!["Hello".to_string()]]);
}

#[rstest]
#[tokio::test]
async fn test_duplicate_values_block_both_records() {
	let data = Collection::from_records(vec![
		Record::new().with("id", 1).with("slug", "same"),
		Record::new().with("id", 2).with("slug", "same"),
	]);
	let options = AdminOptions::new(vec![Column::new("slug", "text").unique(true)])
		.with_local(true)
		.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();

	for id in [1, 2] {
		admin.edit(&Value::from(id)).unwrap();
		let err = admin.save().await.unwrap_err();
		assert!(err.as_validation().unwrap().is_flagged("slug"));
		admin.cancel().unwrap();
	}

	admin.edit(&Value::from(2)).unwrap();
	set_text(&mut admin, "slug", "other");
	admin.save().await.unwrap();
	assert_eq!(data.get(1).unwrap().value("slug"), Value::from("other"));
}

#[rstest]
#[tokio::test]
async fn test_update_keeps_handle_and_id() {
	let data = Collection::from_records(vec![
		Record::new().with("id", "a").with("title", "A"),
		Record::new().with("id", "b").with("title", "B"),
	]);
	let options = AdminOptions::new(vec![
		Column::new("id", "readOnly"),
		Column::new("title", "text"),
	])
	.with_local(true)
	.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();
	let handle = admin.collection();

	admin.edit(&Value::from("b")).unwrap();
	set_text(&mut admin, "title", "Bee");
	admin.save().await.unwrap();

	assert!(handle.ptr_eq(&data));
	assert_eq!(data.ids("id"), vec![Value::from("a"), Value::from("b")]);
	assert_eq!(
		texts(&admin),
		vec![
			vec!["a".to_string(), "A".to_string()],
			vec!["b".to_string(), "Bee".to_string()],
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_delete_guard_and_removal() {
	let data = Collection::from_records(vec![
		Record::new().with("id", 1).with("title", "Keep").with("locked", true),
		Record::new().with("id", 2).with("title", "Drop").with("locked", false),
		Record::new().with("id", 3).with("title", "Tail").with("locked", false),
	]);
	let options = AdminOptions::new(vec![
		Column::new("title", "text"),
		Column::new("locked", "checkbox")
			.delete_validator(|record, _, column| !record.value(column).is_truthy()),
	])
	.with_local(true)
	.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();

	admin.edit(&Value::from(1)).unwrap();
	let err = admin.delete().await.unwrap_err();
	assert!(err.as_validation().unwrap().is_flagged("locked"));
	assert_eq!(data.len(), 3);
	admin.cancel().unwrap();

	admin.edit(&Value::from(2)).unwrap();
	assert_eq!(admin.delete().await.unwrap(), DeleteOutcome::Removed);
	assert_eq!(data.ids("id"), vec![Value::from(1), Value::from(3)]);
	assert_eq!(texts(&admin).len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_reorder_in_place() {
	let data = Collection::from_records(
		["a", "b", "c"]
			.into_iter()
			.map(|id| Record::new().with("id", id).with("title", id.to_uppercase()))
			.collect(),
	);
	let options = AdminOptions::new(vec![Column::new("title", "text")])
		.with_local(true)
		.with_sortable(true)
		.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();

	let outcome = admin
		.reorder(vec![Value::from("c"), Value::from("a"), Value::from("b")])
		.await
		.unwrap();

	assert_eq!(outcome, ReorderOutcome::Applied);
	assert!(admin.collection().ptr_eq(&data));
	assert_eq!(
		rest_admin_core::list::row_ids(admin.current_view()),
		vec!["c", "a", "b"]
	);
}

#[fixture]
fn product() -> Collection {
	Collection::from_records(vec![Record::new().with("id", 1).with("name", "Shirt").with(
		"variants",
		Collection::from_records(vec![Record::new().with("id", "v1").with("size", "S")]),
	)])
}

fn product_schema() -> Vec<Column> {
	vec![
		Column::new("name", "text"),
		Column::new("variants", "admin")
			.label_column("size")
			.nested(NestedOptions::new(vec![Column::new("size", "text").required(true)])),
	]
}

#[rstest]
#[tokio::test]
async fn test_nested_admin_edits_sub_collection(product: Collection) {
	let options = AdminOptions::new(product_schema())
		.with_local(true)
		.with_data(product.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();
	assert_eq!(
		texts(&admin),
		vec![vec!["Shirt".to_string(), "S".to_string()]]
	);

	admin.edit(&Value::from(1)).unwrap();
	{
		let nested = admin
			.session_mut()
			.unwrap()
			.control_mut("variants")
			.unwrap()
			.nested_mut()
			.unwrap();
		assert!(nested.is_local());
		nested.new_record().unwrap();
		nested
			.session_mut()
			.unwrap()
			.control_mut("size")
			.unwrap()
			.set_text("M")
			.unwrap();
		nested.save().await.unwrap();
	}

	// The sub-collection is shared, so the change is visible before the
	// outer save.
	let variants = product.get(0).unwrap().value("variants");
	assert_eq!(variants.as_collection().unwrap().len(), 2);

	admin.save().await.unwrap();
	assert_eq!(
		texts(&admin),
		vec![vec!["Shirt".to_string(), "S, M".to_string()]]
	);
}

#[rstest]
#[tokio::test]
async fn test_new_records_get_fresh_sub_collections() {
	let data = Collection::new();
	let options = AdminOptions::new(product_schema())
		.with_local(true)
		.with_data(data.clone());
	let mut admin = RestAdmin::new(options).unwrap();
	admin.mount().await.unwrap();

	for name in ["One", "Two"] {
		admin.new_record().unwrap();
		set_text(&mut admin, "name", name);
		admin.save().await.unwrap();
	}

	let first = data.get(0).unwrap().value("variants");
	let second = data.get(1).unwrap().value("variants");
	assert!(!first.as_collection().unwrap().ptr_eq(second.as_collection().unwrap()));
}

#[rstest]
fn test_nested_unknown_type_is_rejected() {
	let schema = vec![
		Column::new("variants", "admin")
			.nested(NestedOptions::new(vec![Column::new("size", "dropdown")])),
	];
	let result = RestAdmin::new(AdminOptions::new(schema).with_local(true));
	assert!(matches!(result, Err(AdminError::UnknownType(name)) if name == "dropdown"));
}
