//! List screen.

use crate::registry::TypeRegistry;
use rest_admin_pages::{ElementView, IntoView, View};
use rest_admin_types::{AdminResult, Column, Record, Value};

/// Renders records as a table.
///
/// The screen is a New button followed by a striped table. Each row
/// carries `data-role="row"` and the record identifier in `data-id`; each
/// cell carries the column name as its class. When sorting is enabled the
/// first cell starts with a move handle.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
	schema: &'a [Column],
	registry: &'a TypeRegistry,
	id_column: &'a str,
	sortable: bool,
}

impl<'a> ListView<'a> {
	/// Creates a list renderer.
	pub fn new(
		schema: &'a [Column],
		registry: &'a TypeRegistry,
		id_column: &'a str,
		sortable: bool,
	) -> Self {
		Self {
			schema,
			registry,
			id_column,
			sortable,
		}
	}

	/// Renders the whole list screen.
	pub fn render(&self, records: &[Record]) -> AdminResult<View> {
		let header = ElementView::new("thead").child(
			ElementView::new("tr")
				.children(self.schema.iter().map(|column| {
					ElementView::new("th")
						.class(column.name.clone())
						.child(column.label.clone())
				}))
				.child(ElementView::new("th").child("Actions")),
		);

		let rows = records
			.iter()
			.map(|record| self.render_row(record))
			.collect::<AdminResult<Vec<_>>>()?;

		let table = ElementView::new("table")
			.class("table table-striped")
			.child(header)
			.child(ElementView::new("tbody").children(rows));

		let new_button = ElementView::new("button")
			.class("btn btn-primary btn-large")
			.attr("data-role", "new")
			.child(ElementView::new("i").class("icon-plus"))
			.child(" New");

		Ok(View::fragment([new_button.into_view(), table.into_view()]))
	}

	fn render_row(&self, record: &Record) -> AdminResult<ElementView> {
		let mut cells = Vec::with_capacity(self.schema.len() + 1);
		for (index, column) in self.schema.iter().enumerate() {
			let summary = self.registry.summary(column, &record.value(&column.name))?;
			let mut cell = ElementView::new("td").class(column.name.clone());
			if index == 0 && self.sortable {
				cell = cell.child(ElementView::new("i").class("icon-move"));
			}
			cells.push(cell.child(summary));
		}
		cells.push(
			ElementView::new("td").child(
				ElementView::new("a")
					.attr("href", "#")
					.class("btn btn-mini")
					.attr("data-role", "edit")
					.child(ElementView::new("i").class("icon-pencil"))
					.child(" Edit"),
			),
		);

		let id = record.id(self.id_column).map(Value::path_segment).unwrap_or_default();
		Ok(ElementView::new("tr")
			.attr("data-role", "row")
			.attr("data-id", id)
			.children(cells))
	}
}

/// Summary text of every cell, row by row, as a rendered list shows it.
pub fn summary_texts(view: &View) -> Vec<Vec<String>> {
	view.find_by_role("row")
		.into_iter()
		.map(|row| {
			row.child_views()
				.iter()
				.filter_map(View::as_element)
				.filter(|cell| cell.find_by_role("edit").is_empty())
				.map(|cell| cell.text_content())
				.collect()
		})
		.collect()
}

/// `data-id` of every row, in display order.
pub fn row_ids(view: &View) -> Vec<String> {
	view.find_by_role("row")
		.into_iter()
		.filter_map(|row| row.attr_value("data-id"))
		.map(str::to_string)
		.collect()
}

/// Identifier order after dragging the row at `from` to position `to`.
///
/// Returns `None` when either index is out of range.
pub fn order_after_move(ids: &[Value], from: usize, to: usize) -> Option<Vec<Value>> {
	if from >= ids.len() || to >= ids.len() {
		return None;
	}
	let mut order = ids.to_vec();
	let moved = order.remove(from);
	order.insert(to, moved);
	Some(order)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rest_admin_types::Choice;
	use rstest::{fixture, rstest};

	#[fixture]
	fn schema() -> Vec<Column> {
		vec![
			Column::new("title", "text").label("Title"),
			Column::new("published", "checkbox").label("Published"),
			Column::new("size", "select")
				.choices(vec![Choice::new("s", "Small"), Choice::new("l", "Large")]),
		]
	}

	fn records() -> Vec<Record> {
		vec![
			Record::new()
				.with("id", 1)
				.with("title", "Hello")
				.with("published", true)
				.with("size", "l"),
			Record::new()
				.with("id", 2)
				.with("title", "World")
				.with("published", false),
		]
	}

	#[rstest]
	fn test_rows_and_summaries(schema: Vec<Column>) {
		let registry = TypeRegistry::default();
		let view = ListView::new(&schema, &registry, "id", false)
			.render(&records())
			.unwrap();

		assert_eq!(
			summary_texts(&view),
			vec![
				vec!["Hello".to_string(), "Yes".to_string(), "Large".to_string()],
				vec!["World".to_string(), "No".to_string(), String::new()],
			]
		);
		assert_eq!(row_ids(&view), vec!["1", "2"]);
		assert_eq!(view.find_by_role("new").len(), 1);
		assert_eq!(view.find_by_role("edit").len(), 2);
	}

	#[rstest]
	fn test_header_has_labels_and_actions(schema: Vec<Column>) {
		let registry = TypeRegistry::default();
		let html = ListView::new(&schema, &registry, "id", false)
			.render(&[])
			.unwrap()
			.render_to_string();
		assert!(html.contains(
			"<thead><tr><th class=\"title\">Title</th><th class=\"published\">Published</th><th class=\"size\">size</th><th>Actions</th></tr></thead>"
		));
		assert!(html.contains("<tbody></tbody>"));
	}

	#[rstest]
	fn test_move_handle_only_when_sortable(schema: Vec<Column>) {
		let registry = TypeRegistry::default();
		let sortable = ListView::new(&schema, &registry, "id", true)
			.render(&records())
			.unwrap()
			.render_to_string();
		let fixed = ListView::new(&schema, &registry, "id", false)
			.render(&records())
			.unwrap()
			.render_to_string();
		assert_eq!(sortable.matches("icon-move").count(), 2);
		assert!(!fixed.contains("icon-move"));
	}

	#[rstest]
	fn test_unknown_type_fails_render() {
		let registry = TypeRegistry::default();
		let schema = vec![Column::new("x", "nope")];
		assert!(
			ListView::new(&schema, &registry, "id", false)
				.render(&records())
				.is_err()
		);
	}

	#[rstest]
	#[case(0, 2, Some(vec!["b", "c", "a"]))]
	#[case(2, 0, Some(vec!["c", "a", "b"]))]
	#[case(1, 1, Some(vec!["a", "b", "c"]))]
	#[case(3, 0, None)]
	fn test_order_after_move(
		#[case] from: usize,
		#[case] to: usize,
		#[case] expected: Option<Vec<&str>>,
	) {
		let ids: Vec<Value> = ["a", "b", "c"].into_iter().map(Value::from).collect();
		let expected = expected.map(|ids| ids.into_iter().map(Value::from).collect::<Vec<_>>());
		assert_eq!(order_after_move(&ids, from, to), expected);
	}
}
