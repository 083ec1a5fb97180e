//! Editable controls.
//!
//! A [`Control`] is what a type's `render_control` produces for one column of
//! the edit form. It holds the edited state (the [`Widget`]), the element id
//! it renders with, and two lifecycle hooks:
//!
//! - **sync** runs before the form reads the value back, so controls backed
//!   by an external editor can push their content into the control;
//! - **attached** runs once after the form is placed in its container.

pub mod richtext;

use crate::admin::RestAdmin;
use rest_admin_pages::{ElementView, IntoView, View};
use rest_admin_types::{AdminError, AdminResult, Collection, Value};
use richtext::RichTextState;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Lifecycle hook of a control.
pub type ControlHook = Arc<dyn Fn(&mut Control) + Send + Sync>;

/// A control implemented outside this crate.
///
/// Registered types that need a widget none of the built-in variants
/// provide return a [`Widget::Custom`].
pub trait CustomWidget: Send + Sync {
	/// Renders the control element.
	fn render(&self) -> View;

	/// Current edited value.
	fn value(&self) -> Value;

	/// Downcasting support.
	fn as_any(&self) -> &dyn Any;

	/// Mutable downcasting support.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
	/// Original value of the choice
	pub value: Value,
	/// Displayed label
	pub label: String,
}

/// Edited state of a control.
pub enum Widget {
	/// Single-line text input
	TextInput {
		/// Input text
		value: String,
		/// Whether the user may edit the text
		read_only: bool,
	},
	/// Multi-line text
	TextArea {
		/// Text content
		value: String,
	},
	/// Boolean toggle
	Checkbox {
		/// Whether the box is checked
		checked: bool,
	},
	/// Choice list
	Select {
		/// Available options in order
		options: Vec<SelectOption>,
		/// Index of the selected option
		selected: Option<usize>,
	},
	/// Textarea bound to an external rich-text editor
	RichText(RichTextState),
	/// An embedded admin over a sub-collection
	Nested(Box<RestAdmin>),
	/// Caller-provided control
	Custom(Box<dyn CustomWidget>),
}

impl Widget {
	/// Short name of the widget kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Widget::TextInput { .. } => "text input",
			Widget::TextArea { .. } => "textarea",
			Widget::Checkbox { .. } => "checkbox",
			Widget::Select { .. } => "select",
			Widget::RichText(_) => "rich text editor",
			Widget::Nested(_) => "nested admin",
			Widget::Custom(_) => "custom control",
		}
	}
}

impl fmt::Debug for Widget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Widget::TextInput { value, read_only } => f
				.debug_struct("TextInput")
				.field("value", value)
				.field("read_only", read_only)
				.finish(),
			Widget::TextArea { value } => f.debug_struct("TextArea").field("value", value).finish(),
			Widget::Checkbox { checked } => {
				f.debug_struct("Checkbox").field("checked", checked).finish()
			}
			Widget::Select { options, selected } => f
				.debug_struct("Select")
				.field("options", options)
				.field("selected", selected)
				.finish(),
			Widget::RichText(state) => f.debug_tuple("RichText").field(state).finish(),
			Widget::Nested(admin) => f
				.debug_tuple("Nested")
				.field(&admin.collection().len())
				.finish(),
			Widget::Custom(_) => f.write_str("Custom"),
		}
	}
}

/// An editable control bound to one column.
pub struct Control {
	column: String,
	element_id: Option<String>,
	widget: Widget,
	on_sync: Option<ControlHook>,
	on_attached: Option<ControlHook>,
	attached: bool,
}

impl Control {
	/// Creates a control for `column`.
	pub fn new(column: impl Into<String>, widget: Widget) -> Self {
		Self {
			column: column.into(),
			element_id: None,
			widget,
			on_sync: None,
			on_attached: None,
			attached: false,
		}
	}

	/// Sets the element id the control renders with.
	pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
		self.element_id = Some(id.into());
		self
	}

	/// Sets the hook run before the value is read back.
	pub fn on_sync<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut Control) + Send + Sync + 'static,
	{
		self.on_sync = Some(Arc::new(hook));
		self
	}

	/// Sets the hook run once the control is in the live view.
	pub fn on_attached<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut Control) + Send + Sync + 'static,
	{
		self.on_attached = Some(Arc::new(hook));
		self
	}

	/// Column this control edits.
	pub fn column(&self) -> &str {
		&self.column
	}

	/// Element id, if the control has one.
	pub fn element_id(&self) -> Option<&str> {
		self.element_id.as_deref()
	}

	/// The edited state.
	pub fn widget(&self) -> &Widget {
		&self.widget
	}

	/// The edited state, mutably.
	pub fn widget_mut(&mut self) -> &mut Widget {
		&mut self.widget
	}

	/// Returns true once the attached hook has run.
	pub fn is_attached(&self) -> bool {
		self.attached
	}

	/// Runs the sync hook.
	pub fn sync(&mut self) {
		if let Some(hook) = self.on_sync.clone() {
			hook(self);
		}
	}

	/// Runs the attached hook the first time it is called.
	pub fn attach(&mut self) {
		if self.attached {
			return;
		}
		self.attached = true;
		if let Some(hook) = self.on_attached.clone() {
			hook(self);
		}
	}

	pub(crate) fn mismatch(&self, expected: &'static str) -> AdminError {
		AdminError::ControlMismatch {
			column: self.column.clone(),
			expected,
		}
	}

	/// Types into a text, textarea or richtext control.
	pub fn set_text(&mut self, text: impl Into<String>) -> AdminResult<()> {
		let text = text.into();
		match &mut self.widget {
			Widget::TextInput {
				value,
				read_only: false,
			}
			| Widget::TextArea { value } => {
				*value = text;
				Ok(())
			}
			Widget::RichText(state) => {
				if let Some(editor) = state.editor_mut() {
					editor.set_content(&text);
				}
				state.value = text;
				Ok(())
			}
			_ => Err(self.mismatch("editable text control")),
		}
	}

	/// Checks or unchecks a checkbox.
	pub fn set_checked(&mut self, checked: bool) -> AdminResult<()> {
		match &mut self.widget {
			Widget::Checkbox { checked: state } => {
				*state = checked;
				Ok(())
			}
			_ => Err(self.mismatch("checkbox")),
		}
	}

	/// Selects the option whose value equals `value`.
	///
	/// Returns false, leaving the selection untouched, when no option matches.
	pub fn select_value(&mut self, value: &Value) -> AdminResult<bool> {
		match &mut self.widget {
			Widget::Select { options, selected } => {
				match options.iter().position(|o| o.value.strict_eq(value)) {
					Some(index) => {
						*selected = Some(index);
						Ok(true)
					}
					None => Ok(false),
				}
			}
			_ => Err(self.mismatch("select")),
		}
	}

	/// The embedded admin of an admin control.
	pub fn nested_mut(&mut self) -> Option<&mut RestAdmin> {
		match &mut self.widget {
			Widget::Nested(admin) => Some(admin),
			_ => None,
		}
	}

	/// Downcasts a custom widget.
	pub fn custom<T: 'static>(&self) -> Option<&T> {
		match &self.widget {
			Widget::Custom(widget) => widget.as_any().downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Mutably downcasts a custom widget.
	pub fn custom_mut<T: 'static>(&mut self) -> Option<&mut T> {
		match &mut self.widget {
			Widget::Custom(widget) => widget.as_any_mut().downcast_mut::<T>(),
			_ => None,
		}
	}

	/// The control's value as a generic form read would see it.
	///
	/// Text-like controls yield their text, checkboxes a boolean, selects
	/// the selected choice's value (`Null` when nothing is selected) and
	/// nested admins their collection.
	pub fn value(&self) -> Value {
		match &self.widget {
			Widget::TextInput { value, .. } | Widget::TextArea { value } => Value::from(value.as_str()),
			Widget::Checkbox { checked } => Value::Bool(*checked),
			Widget::Select { options, selected } => selected
				.and_then(|i| options.get(i))
				.map(|o| o.value.clone())
				.unwrap_or_default(),
			Widget::RichText(state) => Value::from(state.value.as_str()),
			Widget::Nested(admin) => Value::Collection(admin.collection()),
			Widget::Custom(widget) => widget.value(),
		}
	}

	/// The collection of a nested admin control.
	pub fn collection(&self) -> AdminResult<Collection> {
		match &self.widget {
			Widget::Nested(admin) => Ok(admin.collection()),
			_ => Err(self.mismatch("nested admin")),
		}
	}

	/// Renders the control element.
	pub fn render(&self) -> View {
		let element = match &self.widget {
			Widget::TextInput { value, read_only } => ElementView::new("input")
				.attr("type", "text")
				.attr("data-role", "control")
				.attr_if(*read_only, "readonly", "readonly")
				.attr("value", value.clone()),
			Widget::TextArea { value } => ElementView::new("textarea")
				.attr("data-role", "control")
				.child(value.clone()),
			Widget::Checkbox { checked } => ElementView::new("input")
				.attr("type", "checkbox")
				.attr("data-role", "control")
				.attr("value", "1")
				.attr_if(*checked, "checked", "checked"),
			Widget::Select { options, selected } => ElementView::new("select")
				.attr("data-role", "control")
				.children(options.iter().enumerate().map(|(i, option)| {
					ElementView::new("option")
						.attr("value", option.value.path_segment())
						.attr_if(*selected == Some(i), "selected", "selected")
						.child(option.label.clone())
				})),
			Widget::RichText(state) => ElementView::new("textarea")
				.attr("data-role", "control")
				.class("rest-admin rich-text")
				.child(state.value.clone()),
			Widget::Nested(admin) => ElementView::new("div")
				.class("nested-rest-admin")
				.attr("data-role", "nestedRestAdmin")
				.child(admin.current_view().clone()),
			Widget::Custom(widget) => {
				return self.decorate_custom(widget.render());
			}
		};
		let element = match &self.element_id {
			Some(id) => element.attr("id", id.clone()),
			None => element,
		};
		element.attr("data-column", self.column.clone()).into_view()
	}

	fn decorate_custom(&self, view: View) -> View {
		match view {
			View::Element(element) => element
				.attr("data-column", self.column.clone())
				.into_view(),
			other => other,
		}
	}
}

impl fmt::Debug for Control {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Control")
			.field("column", &self.column)
			.field("element_id", &self.element_id)
			.field("widget", &self.widget)
			.field("attached", &self.attached)
			.finish_non_exhaustive()
	}
}
