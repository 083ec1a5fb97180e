//! Built-in column types.

use super::{TypeBehavior, TypeRegistry};
use crate::admin::RestAdmin;
use crate::control::richtext::{RichTextState, next_editor_id};
use crate::control::{Control, SelectOption, Widget};
use crate::options::AdminOptions;
use rest_admin_pages::View;
use rest_admin_types::{AdminError, Collection, Column, Value};
use scraper::Html;
use std::sync::Arc;

/// Summary length of textarea and richtext columns, in characters.
pub const SUMMARY_LENGTH: usize = 80;

pub(crate) fn install(registry: &mut TypeRegistry) {
	registry.insert("text", text());
	registry.insert("textarea", textarea());
	registry.insert("richtext", richtext());
	registry.insert("checkbox", checkbox());
	registry.insert("readOnly", read_only());
	registry.insert("select", select());
	registry.insert("admin", admin());
}

fn truncate(text: &str, max: usize) -> String {
	text.chars().take(max).collect()
}

/// Plain text of an HTML fragment.
pub fn strip_markup(markup: &str) -> String {
	let fragment = Html::parse_fragment(markup);
	fragment.root_element().text().collect()
}

fn empty_string(_: &Column) -> Value {
	Value::from("")
}

/// Single-line text.
pub fn text() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|_, value| View::text(value.display_text())),
		render_control: Arc::new(|column, value, _| {
			Ok(Control::new(
				column.name.clone(),
				Widget::TextInput {
					value: value.display_text(),
					read_only: false,
				},
			))
		}),
		read_control_value: None,
		default_value: Arc::new(empty_string),
		self_updating: false,
	}
}

/// Multi-line text, summarized to its first 80 characters.
pub fn textarea() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|_, value| {
			View::text(truncate(&value.display_text(), SUMMARY_LENGTH))
		}),
		render_control: Arc::new(|column, value, _| {
			Ok(Control::new(
				column.name.clone(),
				Widget::TextArea {
					value: value.display_text(),
				},
			))
		}),
		read_control_value: None,
		default_value: Arc::new(empty_string),
		self_updating: false,
	}
}

/// Markup edited through an external editor.
///
/// The summary is the markup's plain text, cut to 80 characters. Values
/// that are not scalars summarize to the empty string.
pub fn richtext() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|_, value| {
			let text = match value {
				Value::String(markup) => strip_markup(markup),
				Value::Number(_) | Value::Bool(_) => value.display_text(),
				_ => String::new(),
			};
			View::text(truncate(&text, SUMMARY_LENGTH))
		}),
		render_control: Arc::new(|column, value, context| {
			let state = RichTextState::new(value.display_text(), context.editor_factory.clone());
			Ok(Control::new(column.name.clone(), Widget::RichText(state))
				.with_element_id(next_editor_id())
				.on_attached(|control| {
					let Some(id) = control.element_id().map(str::to_string) else {
						return;
					};
					if let Widget::RichText(state) = control.widget_mut() {
						state.ensure_editor(&id);
					}
				})
				.on_sync(|control| {
					if let Widget::RichText(state) = control.widget_mut() {
						state.sync();
					}
				}))
		}),
		read_control_value: None,
		default_value: Arc::new(empty_string),
		self_updating: false,
	}
}

/// Boolean toggle.
///
/// Reads back `1` when checked and `""` when not, so the field is always
/// submitted and is truthy or falsy on any server.
pub fn checkbox() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|_, value| View::text(if value.is_truthy() { "Yes" } else { "No" })),
		render_control: Arc::new(|column, value, _| {
			Ok(Control::new(
				column.name.clone(),
				Widget::Checkbox {
					checked: value.is_truthy(),
				},
			))
		}),
		read_control_value: Some(Arc::new(|_, control| match control.widget() {
			Widget::Checkbox { checked: true } => Ok(Value::from(1)),
			Widget::Checkbox { checked: false } => Ok(Value::from("")),
			_ => Err(control.mismatch("checkbox")),
		})),
		default_value: Arc::new(|_| Value::Bool(false)),
		self_updating: false,
	}
}

/// Text shown but not editable.
pub fn read_only() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|_, value| View::text(value.display_text())),
		render_control: Arc::new(|column, value, _| {
			Ok(Control::new(
				column.name.clone(),
				Widget::TextInput {
					value: value.display_text(),
					read_only: true,
				},
			))
		}),
		read_control_value: None,
		default_value: Arc::new(empty_string),
		self_updating: false,
	}
}

/// Choice among the column's `choices`.
pub fn select() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|column, value| match column.matching_choice(value) {
			Some((_, choice)) => View::text(choice.field(column.choice_label_field()).display_text()),
			None => View::empty(),
		}),
		render_control: Arc::new(|column, value, _| {
			let options = column
				.choices
				.iter()
				.map(|choice| SelectOption {
					value: choice.field(column.choice_value_field()),
					label: choice.field(column.choice_label_field()).display_text(),
				})
				.collect();
			let selected = column.matching_choice(value).map(|(index, _)| index);
			Ok(Control::new(
				column.name.clone(),
				Widget::Select { options, selected },
			))
		}),
		read_control_value: None,
		default_value: Arc::new(|_| Value::Null),
		self_updating: false,
	}
}

/// Sub-collection edited by an embedded admin in local mode.
///
/// The embedded admin works directly on the record's collection, so the
/// column is self-updating and is never read back.
pub fn admin() -> TypeBehavior {
	TypeBehavior {
		render_summary: Arc::new(|column, value| {
			let label_column = column.label_column.as_deref().unwrap_or_default();
			let labels: Vec<String> = value
				.to_collection()
				.map(|collection| {
					collection.read(|records| {
						records
							.iter()
							.map(|record| record.value(label_column).display_text())
							.collect()
					})
				})
				.unwrap_or_default();
			View::text(labels.join(", "))
		}),
		render_control: Arc::new(|column, value, context| {
			let collection = value
				.as_collection()
				.cloned()
				.ok_or_else(|| AdminError::NotACollection(column.name.clone()))?;
			let nested = column.nested.clone().unwrap_or_default();
			let mut options = AdminOptions::new(nested.schema)
				.with_local(true)
				.with_data(collection)
				.with_sortable(nested.sortable)
				.with_registry(context.registry.clone());
			if let Some(id_column) = nested.id_column {
				options = options.with_id_column(id_column);
			}
			if let Some(message) = nested.remove_confirm {
				options = options.with_remove_confirm(message);
			}
			options.confirm = Some(context.confirm.clone());
			options.editor_factory = Some(context.editor_factory.clone());

			let mut admin = RestAdmin::new(options)?;
			admin.show_list()?;
			Ok(Control::new(
				column.name.clone(),
				Widget::Nested(Box::new(admin)),
			))
		}),
		read_control_value: None,
		default_value: Arc::new(|_| Value::Collection(Collection::new())),
		self_updating: true,
	}
}
