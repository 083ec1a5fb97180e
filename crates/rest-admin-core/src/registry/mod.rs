//! Column type registry.
//!
//! Every column names a type. The [`TypeRegistry`] maps that name to a
//! [`TypeBehavior`], which decides how a value is summarized in the list,
//! which control edits it, how the control is read back and what value a
//! new record starts with.
//!
//! The default registry holds the built-in types `text`, `textarea`,
//! `richtext`, `checkbox`, `readOnly`, `select` and `admin`. Callers adjust
//! or add types with [`TypeOverride`], which is merged field by field: the
//! fields an override sets win, the others keep the existing behavior (or
//! the `text` behavior for a new type name).

pub mod builtin;

use crate::confirm::ConfirmPrompt;
use crate::control::Control;
use crate::control::richtext::RichTextEditorFactory;
use rest_admin_pages::View;
use rest_admin_types::{AdminError, AdminResult, Collection, Column, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Renders the list cell content of a value.
pub type SummaryFn = Arc<dyn Fn(&Column, &Value) -> View + Send + Sync>;

/// Builds the control editing a value.
pub type ControlFn =
	Arc<dyn Fn(&Column, &Value, &ControlContext) -> AdminResult<Control> + Send + Sync>;

/// Reads the edited value back from a control.
pub type ReadFn = Arc<dyn Fn(&Column, &Control) -> AdminResult<Value> + Send + Sync>;

/// Produces the starting value of a new record.
pub type DefaultFn = Arc<dyn Fn(&Column) -> Value + Send + Sync>;

/// What a control builder may need from the widget that renders it.
#[derive(Clone)]
pub struct ControlContext {
	/// Registry of the rendering widget, inherited by nested admins
	pub registry: TypeRegistry,
	/// Creates editors for richtext controls
	pub editor_factory: Arc<dyn RichTextEditorFactory>,
	/// Confirmation prompt, inherited by nested admins
	pub confirm: Arc<dyn ConfirmPrompt>,
}

impl fmt::Debug for ControlContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControlContext")
			.field("registry", &self.registry)
			.finish_non_exhaustive()
	}
}

/// Behavior of one column type.
#[derive(Clone)]
pub struct TypeBehavior {
	/// List cell content
	pub render_summary: SummaryFn,
	/// Control builder
	pub render_control: ControlFn,
	/// Read-back; `None` uses [`Control::value`]
	pub read_control_value: Option<ReadFn>,
	/// Default value factory
	pub default_value: DefaultFn,
	/// The control mutates the record field in place and is never read back
	pub self_updating: bool,
}

impl TypeBehavior {
	/// Applies an override, keeping every field it leaves unset.
	pub fn merge(mut self, over: TypeOverride) -> Self {
		if let Some(summary) = over.render_summary {
			self.render_summary = summary;
		}
		if let Some(control) = over.render_control {
			self.render_control = control;
		}
		if let Some(read) = over.read_control_value {
			self.read_control_value = Some(read);
		}
		if let Some(default) = over.default_value {
			self.default_value = default;
		}
		if let Some(self_updating) = over.self_updating {
			self.self_updating = self_updating;
		}
		self
	}
}

impl fmt::Debug for TypeBehavior {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeBehavior")
			.field("custom_read", &self.read_control_value.is_some())
			.field("self_updating", &self.self_updating)
			.finish_non_exhaustive()
	}
}

/// Partial type behavior merged into a registry entry.
///
/// # Example
///
/// ```rust
/// use rest_admin_core::registry::{TypeOverride, TypeRegistry};
/// use rest_admin_pages::View;
/// use rest_admin_types::{Column, Value};
///
/// let mut registry = TypeRegistry::default();
/// registry.register(
///     "money",
///     TypeOverride::new().summary(|_, value| View::text(format!("${}", value))),
/// );
/// let column = Column::new("price", "money");
/// let summary = registry.summary(&column, &Value::from(5)).unwrap();
/// assert_eq!(summary.text_content(), "$5");
/// ```
#[derive(Clone, Default)]
pub struct TypeOverride {
	/// Replacement list cell renderer
	pub render_summary: Option<SummaryFn>,
	/// Replacement control builder
	pub render_control: Option<ControlFn>,
	/// Replacement read-back
	pub read_control_value: Option<ReadFn>,
	/// Replacement default value factory
	pub default_value: Option<DefaultFn>,
	/// Replacement self-updating flag
	pub self_updating: Option<bool>,
}

impl TypeOverride {
	/// Creates an empty override.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the list cell renderer.
	pub fn summary<F>(mut self, f: F) -> Self
	where
		F: Fn(&Column, &Value) -> View + Send + Sync + 'static,
	{
		self.render_summary = Some(Arc::new(f));
		self
	}

	/// Overrides the control builder.
	pub fn control<F>(mut self, f: F) -> Self
	where
		F: Fn(&Column, &Value, &ControlContext) -> AdminResult<Control> + Send + Sync + 'static,
	{
		self.render_control = Some(Arc::new(f));
		self
	}

	/// Overrides the read-back.
	pub fn read<F>(mut self, f: F) -> Self
	where
		F: Fn(&Column, &Control) -> AdminResult<Value> + Send + Sync + 'static,
	{
		self.read_control_value = Some(Arc::new(f));
		self
	}

	/// Overrides the default value factory.
	pub fn default_with<F>(mut self, f: F) -> Self
	where
		F: Fn(&Column) -> Value + Send + Sync + 'static,
	{
		self.default_value = Some(Arc::new(f));
		self
	}

	/// Overrides the default value with a constant.
	pub fn default_value(self, value: impl Into<Value>) -> Self {
		let value = value.into();
		self.default_with(move |_| fresh_copy(&value))
	}

	/// Overrides the self-updating flag.
	pub fn self_updating(mut self, self_updating: bool) -> Self {
		self.self_updating = Some(self_updating);
		self
	}
}

/// Copies a value, giving collections their own storage.
pub(crate) fn fresh_copy(value: &Value) -> Value {
	match value {
		Value::Collection(c) => Value::Collection(Collection::from_records(c.snapshot())),
		other => other.clone(),
	}
}

/// Registry of column types keyed by name.
#[derive(Clone)]
pub struct TypeRegistry {
	types: HashMap<String, TypeBehavior>,
}

impl TypeRegistry {
	/// Creates a registry without any type.
	pub fn empty() -> Self {
		Self {
			types: HashMap::new(),
		}
	}

	/// Looks up a type.
	pub fn get(&self, type_name: &str) -> AdminResult<&TypeBehavior> {
		self.types
			.get(type_name)
			.ok_or_else(|| AdminError::UnknownType(type_name.to_string()))
	}

	/// Returns true if the type is registered.
	pub fn contains(&self, type_name: &str) -> bool {
		self.types.contains_key(type_name)
	}

	/// Registered type names, sorted.
	pub fn type_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Inserts or replaces a complete behavior.
	pub fn insert(&mut self, type_name: impl Into<String>, behavior: TypeBehavior) {
		self.types.insert(type_name.into(), behavior);
	}

	/// Merges an override into a type.
	///
	/// Unknown type names start from the `text` behavior.
	pub fn register(&mut self, type_name: impl Into<String>, over: TypeOverride) {
		let type_name = type_name.into();
		let base = self
			.types
			.get(&type_name)
			.cloned()
			.unwrap_or_else(builtin::text);
		tracing::debug!(type_name = %type_name, "Registering column type");
		self.types.insert(type_name, base.merge(over));
	}

	/// Checks that every column, nested ones included, names a known type.
	pub fn validate_schema(&self, schema: &[Column]) -> AdminResult<()> {
		for column in schema {
			self.get(&column.column_type)?;
			if let Some(nested) = &column.nested {
				self.validate_schema(&nested.schema)?;
			}
		}
		Ok(())
	}

	/// List cell content of `value` in `column`.
	pub fn summary(&self, column: &Column, value: &Value) -> AdminResult<View> {
		Ok((self.get(&column.column_type)?.render_summary)(column, value))
	}

	/// Builds the control editing `value` in `column`.
	pub fn control(
		&self,
		column: &Column,
		value: &Value,
		context: &ControlContext,
	) -> AdminResult<Control> {
		(self.get(&column.column_type)?.render_control)(column, value, context)
	}

	/// Reads the edited value of `column` back from its control.
	pub fn read(&self, column: &Column, control: &Control) -> AdminResult<Value> {
		match &self.get(&column.column_type)?.read_control_value {
			Some(read) => read(column, control),
			None => Ok(control.value()),
		}
	}

	/// Returns true if the column's type updates records in place.
	pub fn is_self_updating(&self, column: &Column) -> AdminResult<bool> {
		Ok(self.get(&column.column_type)?.self_updating)
	}

	/// Starting value of `column` in a new record.
	///
	/// The column's own default wins over the type default. Self-updating
	/// types get array defaults as a collection of their own.
	pub fn default_for(&self, column: &Column) -> AdminResult<Value> {
		let behavior = self.get(&column.column_type)?;
		let value = match &column.default_value {
			Some(value) => fresh_copy(value),
			None => (behavior.default_value)(column),
		};
		Ok(match value.to_collection() {
			Some(collection) if behavior.self_updating && !value.is_collection() => {
				Value::Collection(collection)
			}
			_ => value,
		})
	}
}

impl Default for TypeRegistry {
	fn default() -> Self {
		let mut registry = Self::empty();
		builtin::install(&mut registry);
		registry
	}
}

impl fmt::Debug for TypeRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("types", &self.type_names())
			.finish()
	}
}
