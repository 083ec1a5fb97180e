//! Rich-text editor seam.
//!
//! The editor itself lives outside this crate. A richtext control renders a
//! plain textarea with a generated element id and, once the control is
//! attached to the live view, asks a [`RichTextEditorFactory`] to bind an
//! editor to that id. Before the form reads the control back, the editor's
//! content is synced into the control.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a fresh `jra-rte-<n>` element id, unique within the process.
pub fn next_editor_id() -> String {
	format!("jra-rte-{}", NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed))
}

/// An editor instance bound to one richtext control.
pub trait RichTextEditor: Send + Sync {
	/// Current markup held by the editor.
	fn content(&self) -> String;

	/// Replaces the editor markup.
	fn set_content(&mut self, content: &str);
}

/// Creates editors for richtext controls.
pub trait RichTextEditorFactory: Send + Sync {
	/// Binds a new editor to the element `element_id`, seeded with `initial`.
	fn attach(&self, element_id: &str, initial: &str) -> Box<dyn RichTextEditor>;
}

/// Editor that stores markup as-is, standing in for a real editor.
#[derive(Debug, Clone, Default)]
pub struct TextareaEditor {
	content: String,
}

impl RichTextEditor for TextareaEditor {
	fn content(&self) -> String {
		self.content.clone()
	}

	fn set_content(&mut self, content: &str) {
		self.content = content.to_string();
	}
}

/// Factory producing [`TextareaEditor`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaEditorFactory;

impl RichTextEditorFactory for TextareaEditorFactory {
	fn attach(&self, element_id: &str, initial: &str) -> Box<dyn RichTextEditor> {
		tracing::debug!(element_id, "Attaching textarea editor");
		Box::new(TextareaEditor {
			content: initial.to_string(),
		})
	}
}

/// State of a richtext control.
pub struct RichTextState {
	/// Markup of the bound textarea
	pub value: String,
	pub(crate) editor: Option<Box<dyn RichTextEditor>>,
	pub(crate) factory: Arc<dyn RichTextEditorFactory>,
}

impl RichTextState {
	pub(crate) fn new(value: String, factory: Arc<dyn RichTextEditorFactory>) -> Self {
		Self {
			value,
			editor: None,
			factory,
		}
	}

	/// Returns true once an editor has been bound.
	pub fn has_editor(&self) -> bool {
		self.editor.is_some()
	}

	/// The bound editor, if any.
	pub fn editor_mut(&mut self) -> Option<&mut (dyn RichTextEditor + 'static)> {
		self.editor.as_deref_mut()
	}

	/// Binds an editor unless one is already bound.
	pub(crate) fn ensure_editor(&mut self, element_id: &str) {
		if self.editor.is_none() {
			self.editor = Some(self.factory.attach(element_id, &self.value));
		}
	}

	/// Copies the editor content into the bound value.
	pub(crate) fn sync(&mut self) {
		if let Some(editor) = &self.editor {
			self.value = editor.content();
		}
	}
}

impl fmt::Debug for RichTextState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RichTextState")
			.field("value", &self.value)
			.field("has_editor", &self.editor.is_some())
			.finish_non_exhaustive()
	}
}
