//! Edit form engine.
//!
//! An [`EditSession`] holds the draft record being edited, one control per
//! column and the columns flagged by the last save or delete attempt. The
//! draft is a copy of the listed record, so nothing reaches the collection
//! until the data source accepts the save. Sub-collections are the
//! exception: they are shared handles, and nested admins edit them in
//! place.

use crate::control::Control;
use crate::registry::{ControlContext, TypeRegistry};
use rest_admin_pages::{ElementView, IntoView, View};
use rest_admin_types::{
	AdminResult, Collection, Column, Record, ValidationFailure, Value, ViolationKind,
};

/// Makes sure a self-updating field holds a collection stored in the draft.
///
/// Self-updating controls edit the field in place, so a missing value or a
/// plain array of records is replaced by a collection before any control
/// is built. Other values are left to the type.
fn seed_in_place(draft: &mut Record, column: &Column, registry: &TypeRegistry) -> AdminResult<()> {
	let current = draft.value(&column.name);
	if current.is_collection() {
		return Ok(());
	}
	let seeded = match current.to_collection() {
		Some(collection) => Value::Collection(collection),
		None if current.is_null() => registry.default_for(column)?,
		None => return Ok(()),
	};
	draft.set(column.name.clone(), seeded);
	Ok(())
}

/// Whether the session creates or edits a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
	/// A record that does not exist yet
	New,
	/// An existing record
	Editing {
		/// Identifier of the record being edited
		id: Value,
	},
}

/// One open edit form.
#[derive(Debug)]
pub struct EditSession {
	state: SessionState,
	draft: Record,
	controls: Vec<Control>,
	flags: ValidationFailure,
}

impl EditSession {
	/// Opens a form for a new record seeded with column and type defaults.
	pub fn new_record(
		schema: &[Column],
		registry: &TypeRegistry,
		context: &ControlContext,
	) -> AdminResult<Self> {
		let mut draft = Record::new();
		for column in schema {
			draft.set(column.name.clone(), registry.default_for(column)?);
		}
		Self::open(SessionState::New, draft, schema, registry, context)
	}

	/// Opens a form over a copy of `record`.
	pub fn edit_record(
		record: &Record,
		id: Value,
		schema: &[Column],
		registry: &TypeRegistry,
		context: &ControlContext,
	) -> AdminResult<Self> {
		Self::open(SessionState::Editing { id }, record.clone(), schema, registry, context)
	}

	fn open(
		state: SessionState,
		mut draft: Record,
		schema: &[Column],
		registry: &TypeRegistry,
		context: &ControlContext,
	) -> AdminResult<Self> {
		for column in schema {
			if registry.is_self_updating(column)? {
				seed_in_place(&mut draft, column, registry)?;
			}
		}
		let controls = schema
			.iter()
			.map(|column| registry.control(column, &draft.value(&column.name), context))
			.collect::<AdminResult<Vec<_>>>()?;
		tracing::debug!(state = ?state, columns = controls.len(), "Opened edit form");
		Ok(Self {
			state,
			draft,
			controls,
			flags: ValidationFailure::default(),
		})
	}

	/// New or editing.
	pub fn state(&self) -> &SessionState {
		&self.state
	}

	/// Returns true for a record that does not exist yet.
	pub fn is_new(&self) -> bool {
		self.state == SessionState::New
	}

	/// The draft record.
	pub fn draft(&self) -> &Record {
		&self.draft
	}

	/// All controls, in schema order.
	pub fn controls(&self) -> &[Control] {
		&self.controls
	}

	/// The control of a column.
	pub fn control(&self, column: &str) -> Option<&Control> {
		self.controls.iter().find(|c| c.column() == column)
	}

	/// The control of a column, mutably.
	pub fn control_mut(&mut self, column: &str) -> Option<&mut Control> {
		self.controls.iter_mut().find(|c| c.column() == column)
	}

	/// Violations flagged by the last attempt.
	pub fn flags(&self) -> &ValidationFailure {
		&self.flags
	}

	/// Returns true if the column's attention arrow is shown.
	pub fn is_flagged(&self, column: &str) -> bool {
		self.flags.is_flagged(column)
	}

	pub(crate) fn set_flags(&mut self, flags: ValidationFailure) {
		self.flags = flags;
	}

	/// Runs every control's attached hook that has not run yet.
	pub fn attach_all(&mut self) {
		for control in &mut self.controls {
			control.attach();
		}
	}

	/// Syncs one column's control and writes its value into the draft.
	///
	/// Self-updating columns and the identifier column are left untouched.
	fn update_column(
		&mut self,
		column: &Column,
		registry: &TypeRegistry,
		id_column: &str,
	) -> AdminResult<()> {
		let Some(control) = self.controls.iter_mut().find(|c| c.column() == column.name) else {
			return Ok(());
		};
		control.sync();
		if registry.is_self_updating(column)? || column.name == id_column {
			return Ok(());
		}
		let value = registry.read(column, control)?;
		tracing::debug!(column = %column.name, value = %value, "Harvested control value");
		self.draft.set(column.name.clone(), value);
		Ok(())
	}

	/// Reads every control back into the draft.
	pub fn harvest(
		&mut self,
		schema: &[Column],
		registry: &TypeRegistry,
		id_column: &str,
	) -> AdminResult<()> {
		for column in schema {
			self.update_column(column, registry, id_column)?;
		}
		Ok(())
	}

	/// Checks `required` and `unique` against `collection`.
	///
	/// A value is a duplicate when another record, one with a different
	/// identifier, holds a strictly equal value.
	pub fn validate(
		&self,
		schema: &[Column],
		collection: &Collection,
		id_column: &str,
	) -> ValidationFailure {
		let mut failure = ValidationFailure::default();
		for column in schema {
			let value = self.draft.value(&column.name);
			if column.required && !value.is_truthy() {
				failure.push(column.name.clone(), ViolationKind::Required);
			}
			if column.unique && self.is_duplicate(column, &value, collection, id_column) {
				failure.push(column.name.clone(), ViolationKind::Unique);
			}
		}
		failure
	}

	fn is_duplicate(
		&self,
		column: &Column,
		value: &Value,
		collection: &Collection,
		id_column: &str,
	) -> bool {
		collection.read(|records| {
			records.iter().any(|other| {
				other.value(&column.name).strict_eq(value) && !other.same_id(&self.draft, id_column)
			})
		})
	}

	/// Runs every delete guard against the draft.
	///
	/// Guarded columns are synced and read back first.
	pub fn check_delete_guards(
		&mut self,
		schema: &[Column],
		registry: &TypeRegistry,
		id_column: &str,
	) -> AdminResult<ValidationFailure> {
		let mut failure = ValidationFailure::default();
		for column in schema {
			let Some(validator) = column.delete_validator.clone() else {
				continue;
			};
			self.update_column(column, registry, id_column)?;
			if !validator(&self.draft, schema, &column.name) {
				failure.push(column.name.clone(), ViolationKind::DeleteGuard);
			}
		}
		Ok(failure)
	}

	/// Renders the form screen.
	pub fn render(&self, schema: &[Column]) -> View {
		let fieldsets = schema.iter().map(|column| self.render_fieldset(column));

		let mut actions = ElementView::new("div")
			.class("form-actions")
			.child(
				ElementView::new("button")
					.class("btn btn-primary")
					.attr("data-role", "submit")
					.child("Save"),
			)
			.child(
				ElementView::new("button")
					.class("btn")
					.attr("data-role", "cancel")
					.child("Cancel"),
			);
		if !self.is_new() {
			actions = actions.child(
				ElementView::new("button")
					.class("btn btn-danger")
					.attr("data-role", "delete")
					.child("Delete"),
			);
		}

		ElementView::new("div")
			.class("editor")
			.child(ElementView::new("form").children(fieldsets).child(actions))
			.into_view()
	}

	fn render_fieldset(&self, column: &Column) -> ElementView {
		let control = self
			.control(&column.name)
			.map(Control::render)
			.unwrap_or(View::Empty);
		let arrow = ElementView::new("i")
			.class("attention-arrow icon-hand-right")
			.attr_if(!self.is_flagged(&column.name), "style", "display: none");

		let label = ElementView::new("label")
			.attr("data-role", "label")
			.child(column.label.clone());
		let fieldset = ElementView::new("fieldset").attr("data-role", "fieldset");

		match column.column_type.as_str() {
			"checkbox" | "radio" => fieldset
				.child(label.class(column.column_type.clone()).prepend(control))
				.child(arrow),
			_ => fieldset.child(label).child(arrow).child(control),
		}
	}
}
