//! Column definitions
//!
//! A schema is an ordered list of [`Column`]s. Each column names a record
//! field, the registered type that renders and edits it, and the validation
//! rules that apply to it. Columns are immutable once a widget is built.

use crate::record::Record;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fmt;
use std::sync::Arc;

/// Guard consulted before a record is deleted.
///
/// Receives the record being deleted, the full schema and the name of the
/// column the guard is attached to. Returning `false` blocks the deletion.
pub type DeleteValidator = Arc<dyn Fn(&Record, &[Column], &str) -> bool + Send + Sync>;

/// One entry of a select column's choice list.
///
/// A choice is an arbitrary object. The fields holding its value and its
/// label are named by the column (`value` and `label` unless overridden).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Choice(pub Map<String, serde_json::Value>);

impl Choice {
	/// Creates a choice with `value` and `label` fields.
	pub fn new(value: impl Into<serde_json::Value>, label: impl Into<String>) -> Self {
		let mut map = Map::new();
		map.insert("value".to_string(), value.into());
		map.insert("label".to_string(), serde_json::Value::String(label.into()));
		Self(map)
	}

	/// Adds or replaces a field.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.0.insert(name.into(), value.into());
		self
	}

	/// Returns a field of the choice, `Value::Null` when absent.
	pub fn field(&self, name: &str) -> Value {
		self.0.get(name).cloned().map(Value::from).unwrap_or_default()
	}
}

/// Settings for the widget embedded by an `admin` column.
#[derive(Debug, Clone, Default)]
pub struct NestedOptions {
	/// Columns of the sub-records
	pub schema: Vec<Column>,
	/// Identifier field of the sub-records, `id` when unset
	pub id_column: Option<String>,
	/// Whether the nested list can be reordered
	pub sortable: bool,
	/// Confirmation message for nested deletions
	pub remove_confirm: Option<String>,
}

impl NestedOptions {
	/// Creates nested options over the given sub-schema.
	pub fn new(schema: Vec<Column>) -> Self {
		Self {
			schema,
			..Self::default()
		}
	}

	/// Sets the identifier field of the sub-records.
	pub fn id_column(mut self, id_column: impl Into<String>) -> Self {
		self.id_column = Some(id_column.into());
		self
	}

	/// Sets whether the nested list is sortable.
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets the nested deletion confirmation message.
	pub fn remove_confirm(mut self, message: impl Into<String>) -> Self {
		self.remove_confirm = Some(message.into());
		self
	}
}

/// A schema entry.
///
/// # Example
///
/// ```rust
/// use rest_admin_types::{Choice, Column};
///
/// let status = Column::new("status", "select")
///     .label("Status")
///     .required(true)
///     .choices(vec![Choice::new("draft", "Draft"), Choice::new("live", "Live")]);
/// assert_eq!(status.choice_value_field(), "value");
/// ```
#[derive(Clone)]
pub struct Column {
	/// Record field this column edits
	pub name: String,
	/// Registered type name
	pub column_type: String,
	/// Header and form label
	pub label: String,
	/// Reject saves where the value is falsy
	pub required: bool,
	/// Reject saves where another record holds the same value
	pub unique: bool,
	/// Seed for new records, overriding the type default
	pub default_value: Option<Value>,
	/// Guard consulted before deletion
	pub delete_validator: Option<DeleteValidator>,
	/// Choices of a select column
	pub choices: Vec<Choice>,
	/// Field of a choice holding its value
	pub choice_value: Option<String>,
	/// Field of a choice holding its label
	pub choice_label: Option<String>,
	/// Field of each sub-record shown in an admin column's summary
	pub label_column: Option<String>,
	/// Settings of the widget embedded by an admin column
	pub nested: Option<NestedOptions>,
}

impl Column {
	/// Creates a column whose label defaults to its name.
	pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: name.clone(),
			name,
			column_type: column_type.into(),
			required: false,
			unique: false,
			default_value: None,
			delete_validator: None,
			choices: Vec::new(),
			choice_value: None,
			choice_label: None,
			label_column: None,
			nested: None,
		}
	}

	/// Sets the label.
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Marks the column as required.
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Marks the column as unique.
	pub fn unique(mut self, unique: bool) -> Self {
		self.unique = unique;
		self
	}

	/// Sets the default value for new records.
	pub fn default_value(mut self, value: impl Into<Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	/// Attaches a delete guard.
	pub fn delete_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&Record, &[Column], &str) -> bool + Send + Sync + 'static,
	{
		self.delete_validator = Some(Arc::new(validator));
		self
	}

	/// Sets the choices of a select column.
	pub fn choices(mut self, choices: Vec<Choice>) -> Self {
		self.choices = choices;
		self
	}

	/// Overrides the field holding a choice's value.
	pub fn choice_value(mut self, field: impl Into<String>) -> Self {
		self.choice_value = Some(field.into());
		self
	}

	/// Overrides the field holding a choice's label.
	pub fn choice_label(mut self, field: impl Into<String>) -> Self {
		self.choice_label = Some(field.into());
		self
	}

	/// Sets the summary field of an admin column.
	pub fn label_column(mut self, field: impl Into<String>) -> Self {
		self.label_column = Some(field.into());
		self
	}

	/// Sets the nested widget settings of an admin column.
	pub fn nested(mut self, options: NestedOptions) -> Self {
		self.nested = Some(options);
		self
	}

	/// Field of a choice holding its value.
	pub fn choice_value_field(&self) -> &str {
		self.choice_value.as_deref().unwrap_or("value")
	}

	/// Field of a choice holding its label.
	pub fn choice_label_field(&self) -> &str {
		self.choice_label.as_deref().unwrap_or("label")
	}

	/// Finds the choice matching a bound value.
	///
	/// A choice matches when its value strictly equals `value`, or, when
	/// `value` is itself an object, when its value equals that object's
	/// value field.
	pub fn matching_choice(&self, value: &Value) -> Option<(usize, &Choice)> {
		let field = self.choice_value_field();
		let wanted = match value {
			Value::Object(_) => value.field(field),
			other => other.clone(),
		};
		self.choices
			.iter()
			.enumerate()
			.find(|(_, choice)| choice.field(field).strict_eq(&wanted))
	}
}

impl fmt::Debug for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Column")
			.field("name", &self.name)
			.field("column_type", &self.column_type)
			.field("label", &self.label)
			.field("required", &self.required)
			.field("unique", &self.unique)
			.field("default_value", &self.default_value)
			.field("has_delete_validator", &self.delete_validator.is_some())
			.field("choices", &self.choices)
			.field("label_column", &self.label_column)
			.field("nested", &self.nested)
			.finish_non_exhaustive()
	}
}
