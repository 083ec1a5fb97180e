//! Widget configuration.

use crate::confirm::ConfirmPrompt;
use crate::control::richtext::RichTextEditorFactory;
use crate::registry::{TypeOverride, TypeRegistry};
use crate::source::ActionOverrides;
use crate::transport::Transport;
use rest_admin_pages::Container;
use rest_admin_types::{Collection, Column, DEFAULT_ID_COLUMN};
use std::fmt;
use std::sync::Arc;

/// Everything a [`RestAdmin`](crate::admin::RestAdmin) is built from.
///
/// Only the schema is mandatory. Defaults are applied once, when the
/// widget is constructed:
///
/// | option           | default                                        |
/// |------------------|------------------------------------------------|
/// | `id_column`      | `"id"`                                         |
/// | `local`          | `false`                                        |
/// | `url`            | none (required when not local)                 |
/// | `data`           | none; fetched on mount                         |
/// | `sortable`       | `false`                                        |
/// | `remove_confirm` | "Are you sure you want to delete this item?"   |
/// | `container`      | none; the view is only kept in memory          |
/// | `confirm`        | always confirm                                 |
/// | `editor_factory` | textarea passthrough editor                    |
/// | `transport`      | HTTP with a 30 second timeout                  |
#[derive(Clone)]
pub struct AdminOptions {
	/// Columns in display order
	pub schema: Vec<Column>,
	/// Identifier field
	pub id_column: String,
	/// Work on `data` in place instead of calling an endpoint
	pub local: bool,
	/// Collection endpoint
	pub url: Option<String>,
	/// Initial records, shared with the caller
	pub data: Option<Collection>,
	/// Per-action replacements
	pub actions: ActionOverrides,
	/// Type overrides merged into the registry, in order
	pub types: Vec<(String, TypeOverride)>,
	/// Base registry; the built-in one when unset
	pub registry: Option<TypeRegistry>,
	/// Allow reordering rows
	pub sortable: bool,
	/// Deletion confirmation message
	pub remove_confirm: Option<String>,
	/// Render target
	pub container: Option<Arc<dyn Container>>,
	/// Deletion confirmation prompt
	pub confirm: Option<Arc<dyn ConfirmPrompt>>,
	/// Rich-text editor factory
	pub editor_factory: Option<Arc<dyn RichTextEditorFactory>>,
	/// Transport of the remote source
	pub transport: Option<Arc<dyn Transport>>,
}

impl AdminOptions {
	/// Creates options for `schema` with every default.
	pub fn new(schema: Vec<Column>) -> Self {
		Self {
			schema,
			id_column: DEFAULT_ID_COLUMN.to_string(),
			local: false,
			url: None,
			data: None,
			actions: ActionOverrides::default(),
			types: Vec::new(),
			registry: None,
			sortable: false,
			remove_confirm: None,
			container: None,
			confirm: None,
			editor_factory: None,
			transport: None,
		}
	}

	/// Sets the identifier field.
	pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
		self.id_column = id_column.into();
		self
	}

	/// Selects local mode.
	pub fn with_local(mut self, local: bool) -> Self {
		self.local = local;
		self
	}

	/// Sets the collection endpoint.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	/// Supplies initial records. The widget lists them on mount without
	/// fetching.
	pub fn with_data(mut self, data: Collection) -> Self {
		self.data = Some(data);
		self
	}

	/// Replaces single actions.
	pub fn with_actions(mut self, actions: ActionOverrides) -> Self {
		self.actions = actions;
		self
	}

	/// Adds or adjusts a column type.
	pub fn with_type(mut self, type_name: impl Into<String>, over: TypeOverride) -> Self {
		self.types.push((type_name.into(), over));
		self
	}

	/// Starts from `registry` instead of the built-in types.
	pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Allows reordering.
	pub fn with_sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets the deletion confirmation message.
	pub fn with_remove_confirm(mut self, message: impl Into<String>) -> Self {
		self.remove_confirm = Some(message.into());
		self
	}

	/// Sets the render target.
	pub fn with_container(mut self, container: impl Container + 'static) -> Self {
		self.container = Some(Arc::new(container));
		self
	}

	/// Sets the deletion confirmation prompt.
	pub fn with_confirm(mut self, confirm: impl ConfirmPrompt + 'static) -> Self {
		self.confirm = Some(Arc::new(confirm));
		self
	}

	/// Sets the rich-text editor factory.
	pub fn with_editor_factory(mut self, factory: impl RichTextEditorFactory + 'static) -> Self {
		self.editor_factory = Some(Arc::new(factory));
		self
	}

	/// Sets the transport of the remote source.
	pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
		self.transport = Some(Arc::new(transport));
		self
	}

	/// Builds the registry: the base one with every type override merged.
	pub fn build_registry(&self) -> TypeRegistry {
		let mut registry = self.registry.clone().unwrap_or_default();
		for (type_name, over) in &self.types {
			registry.register(type_name.clone(), over.clone());
		}
		registry
	}
}

impl fmt::Debug for AdminOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AdminOptions")
			.field("schema", &self.schema)
			.field("id_column", &self.id_column)
			.field("local", &self.local)
			.field("url", &self.url)
			.field("has_data", &self.data.is_some())
			.field("actions", &self.actions)
			.field("sortable", &self.sortable)
			.field("remove_confirm", &self.remove_confirm)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rest_admin_pages::View;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let options = AdminOptions::new(vec![Column::new("title", "text")]);
		assert_eq!(options.id_column, "id");
		assert!(!options.local);
		assert!(!options.sortable);
		assert!(options.url.is_none());
		assert!(options.remove_confirm.is_none());
	}

	#[rstest]
	fn test_type_overrides_apply_in_order() {
		let options = AdminOptions::new(Vec::new())
			.with_type("flag", TypeOverride::new().summary(|_, _| View::text("first")))
			.with_type("flag", TypeOverride::new().summary(|_, _| View::text("second")));
		let registry = options.build_registry();
		let summary = registry
			.summary(&Column::new("f", "flag"), &Default::default())
			.unwrap();
		assert_eq!(summary.text_content(), "second");
	}
}
