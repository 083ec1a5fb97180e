//! The widget controller.

use crate::confirm::{AlwaysConfirm, ConfirmPrompt, DEFAULT_REMOVE_CONFIRM};
use crate::control::richtext::{RichTextEditorFactory, TextareaEditorFactory};
use crate::form::EditSession;
use crate::list::{ListView, order_after_move};
use crate::notify::{ListListeners, ListRendered};
use crate::options::AdminOptions;
use crate::registry::{ControlContext, TypeRegistry};
use crate::source::{DataSource, LocalDataSource, OverriddenSource, RemoteDataSource};
use crate::transport::Transport;
use rest_admin_pages::{Container, View};
use rest_admin_types::{
	AdminError, AdminResult, Collection, Column, Record, ValidationFailure, Value,
};
use std::fmt;
use std::sync::Arc;

/// Result of a delete request that passed the delete guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
	/// The record was removed and the list re-rendered
	Removed,
	/// The user declined the confirmation; the form stays open
	Declined,
}

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
	/// The source accepted the new order
	Applied,
	/// The source rejected it; the list was reloaded from the source
	Reverted,
}

enum Screen {
	List,
	Edit(EditSession),
}

/// A data-table admin widget.
///
/// The widget shows either the list of records or one edit form. Every
/// successful mutation refetches the collection and re-renders the list,
/// so the screen always reflects what the source holds.
///
/// # Example
///
/// ```rust
/// use rest_admin_core::{AdminOptions, RestAdmin};
/// use rest_admin_types::{Collection, Column, Record};
///
/// let data = Collection::from_records(vec![Record::new().with("id", 1).with("title", "Hello")]);
/// let options = AdminOptions::new(vec![Column::new("title", "text").label("Title")])
///     .with_local(true)
///     .with_data(data);
/// let mut admin = RestAdmin::new(options).unwrap();
/// admin.show_list().unwrap();
/// assert!(admin.current_html().contains("Hello"));
/// ```
pub struct RestAdmin {
	schema: Vec<Column>,
	id_column: String,
	sortable: bool,
	remove_confirm: String,
	registry: TypeRegistry,
	source: Box<dyn DataSource>,
	container: Option<Arc<dyn Container>>,
	confirm: Arc<dyn ConfirmPrompt>,
	editor_factory: Arc<dyn RichTextEditorFactory>,
	listeners: ListListeners,
	screen: Screen,
	current: View,
	has_initial_data: bool,
}

impl RestAdmin {
	/// Builds a widget from `options`.
	///
	/// Fails when a column names an unknown type, or when remote mode has
	/// no url. Nothing is rendered or fetched yet.
	pub fn new(options: AdminOptions) -> AdminResult<Self> {
		let registry = options.build_registry();
		registry.validate_schema(&options.schema)?;

		let has_initial_data = options.data.is_some();
		let collection = options.data.clone().unwrap_or_default();
		let base: Box<dyn DataSource> = if options.local {
			Box::new(LocalDataSource::new(collection, options.id_column.clone()))
		} else {
			let url = options.url.clone().ok_or(AdminError::MissingUrl)?;
			let transport = match options.transport.clone() {
				Some(transport) => transport,
				None => default_transport()?,
			};
			Box::new(RemoteDataSource::new(
				url,
				options.id_column.clone(),
				transport,
				collection,
			))
		};
		let source: Box<dyn DataSource> = if options.actions.is_empty() {
			base
		} else {
			Box::new(OverriddenSource::new(base, options.actions.clone()))
		};

		tracing::debug!(
			local = options.local,
			columns = options.schema.len(),
			sortable = options.sortable,
			"Created admin widget"
		);

		Ok(Self {
			schema: options.schema,
			id_column: options.id_column,
			sortable: options.sortable,
			remove_confirm: options
				.remove_confirm
				.unwrap_or_else(|| DEFAULT_REMOVE_CONFIRM.to_string()),
			registry,
			source,
			container: options.container,
			confirm: options.confirm.unwrap_or_else(|| Arc::new(AlwaysConfirm)),
			editor_factory: options
				.editor_factory
				.unwrap_or_else(|| Arc::new(TextareaEditorFactory)),
			listeners: ListListeners::new(),
			screen: Screen::List,
			current: View::Empty,
			has_initial_data,
		})
	}

	/// Shows the widget for the first time.
	///
	/// Initial data is listed as is; otherwise the collection is fetched
	/// first.
	pub async fn mount(&mut self) -> AdminResult<()> {
		if self.has_initial_data {
			self.show_list()
		} else {
			self.refresh_and_list().await
		}
	}

	/// Refetches the collection and lists it.
	///
	/// Runs after every successful mutation.
	pub async fn refresh_and_list(&mut self) -> AdminResult<()> {
		self.source.refresh().await?;
		self.show_list()
	}

	/// Closes any open form and lists the collection as it is.
	pub fn show_list(&mut self) -> AdminResult<()> {
		let records = self.source.collection().snapshot();
		let view = ListView::new(&self.schema, &self.registry, &self.id_column, self.sortable)
			.render(&records)?;
		self.screen = Screen::List;
		let html = self.place(view);
		tracing::debug!(rows = records.len(), "Rendered list");
		self.listeners.emit(&ListRendered {
			rows: records.len(),
			html,
		});
		Ok(())
	}

	/// Opens the form for a new record.
	pub fn new_record(&mut self) -> AdminResult<()> {
		let session = EditSession::new_record(&self.schema, &self.registry, &self.context())?;
		self.open(session);
		Ok(())
	}

	/// Opens the form for the record with identifier `id`.
	pub fn edit(&mut self, id: &Value) -> AdminResult<()> {
		let record = self
			.source
			.collection()
			.find_by_id(&self.id_column, id)
			.ok_or_else(|| AdminError::RecordNotFound(id.display_text()))?;
		let session = EditSession::edit_record(
			&record,
			id.clone(),
			&self.schema,
			&self.registry,
			&self.context(),
		)?;
		self.open(session);
		Ok(())
	}

	/// Opens the form for the record listed at row `index`.
	pub fn edit_row(&mut self, index: usize) -> AdminResult<()> {
		let id = self
			.source
			.collection()
			.get(index)
			.and_then(|record| record.id(&self.id_column).cloned())
			.ok_or_else(|| AdminError::RecordNotFound(format!("row {}", index)))?;
		self.edit(&id)
	}

	fn open(&mut self, session: EditSession) {
		self.screen = Screen::Edit(session);
		self.redraw_form();
	}

	/// Renders the open form and fires pending attached hooks.
	fn redraw_form(&mut self) {
		let Screen::Edit(session) = &self.screen else {
			return;
		};
		let view = session.render(&self.schema);
		self.place(view);
		if let Screen::Edit(session) = &mut self.screen {
			session.attach_all();
		}
	}

	/// Re-renders the current screen.
	///
	/// Useful after driving an embedded admin, whose output is part of the
	/// form of this one.
	pub fn redraw(&mut self) -> AdminResult<()> {
		match self.screen {
			Screen::List => self.show_list(),
			Screen::Edit(_) => {
				self.redraw_form();
				Ok(())
			}
		}
	}

	/// The open edit session.
	pub fn session(&self) -> AdminResult<&EditSession> {
		match &self.screen {
			Screen::Edit(session) => Ok(session),
			Screen::List => Err(AdminError::NoActiveSession),
		}
	}

	/// The open edit session, mutably.
	pub fn session_mut(&mut self) -> AdminResult<&mut EditSession> {
		match &mut self.screen {
			Screen::Edit(session) => Ok(session),
			Screen::List => Err(AdminError::NoActiveSession),
		}
	}

	/// Returns true while a form is open.
	pub fn is_editing(&self) -> bool {
		matches!(self.screen, Screen::Edit(_))
	}

	/// Saves the open form.
	///
	/// Control values are read back into the draft and validated against
	/// the collection. Violations are flagged on the form and returned as
	/// [`AdminError::Validation`] without calling the source. Source
	/// failures are returned with the form left open.
	pub async fn save(&mut self) -> AdminResult<Record> {
		let Screen::Edit(session) = &mut self.screen else {
			return Err(AdminError::NoActiveSession);
		};
		session.set_flags(ValidationFailure::default());
		session.harvest(&self.schema, &self.registry, &self.id_column)?;

		let failure = session.validate(&self.schema, &self.source.collection(), &self.id_column);
		if !failure.is_empty() {
			tracing::warn!(violations = %failure, "Rejected save");
			session.set_flags(failure.clone());
			self.redraw_form();
			return Err(AdminError::Validation(failure));
		}

		let draft = session.draft().clone();
		let stored = if session.is_new() {
			self.source.create(draft).await
		} else {
			self.source.update(draft).await
		};
		let stored = match stored {
			Ok(record) => record,
			Err(e) => {
				tracing::warn!(error = %e, "Save failed");
				return Err(e);
			}
		};
		tracing::info!(
			id = %stored.value(&self.id_column),
			"Saved record"
		);

		self.refresh_and_list().await?;
		Ok(stored)
	}

	/// Deletes the record of the open form.
	///
	/// Delete guards run first and flag the columns that refuse. The
	/// confirmation prompt is asked next; declining keeps the form open.
	pub async fn delete(&mut self) -> AdminResult<DeleteOutcome> {
		let Screen::Edit(session) = &mut self.screen else {
			return Err(AdminError::NoActiveSession);
		};
		if session.is_new() {
			return Err(AdminError::MissingIdentifier(self.id_column.clone()));
		}
		session.set_flags(ValidationFailure::default());
		let failure = session.check_delete_guards(&self.schema, &self.registry, &self.id_column)?;
		if !failure.is_empty() {
			tracing::warn!(violations = %failure, "Delete refused by guard");
			session.set_flags(failure.clone());
			self.redraw_form();
			return Err(AdminError::Validation(failure));
		}
		let record = session.draft().clone();

		if !self.confirm.confirm(&self.remove_confirm) {
			tracing::debug!("Delete declined");
			return Ok(DeleteOutcome::Declined);
		}

		if let Err(e) = self.source.remove(&record).await {
			tracing::warn!(error = %e, "Delete failed");
			return Err(e);
		}
		tracing::info!(id = %record.value(&self.id_column), "Deleted record");

		self.refresh_and_list().await?;
		Ok(DeleteOutcome::Removed)
	}

	/// Discards the open form and lists the collection.
	pub fn cancel(&mut self) -> AdminResult<()> {
		self.show_list()
	}

	/// Applies a new identifier order.
	///
	/// The list is refetched either way. A rejected order is reported as
	/// [`ReorderOutcome::Reverted`], not as an error.
	pub async fn reorder(&mut self, order: Vec<Value>) -> AdminResult<ReorderOutcome> {
		if !self.sortable {
			return Err(AdminError::SortingDisabled);
		}
		match self.source.reorder(&order).await {
			Ok(()) => {
				tracing::info!(count = order.len(), "Reordered records");
				self.refresh_and_list().await?;
				Ok(ReorderOutcome::Applied)
			}
			Err(e) => {
				tracing::warn!(error = %e, "Reorder rejected, reloading");
				self.refresh_and_list().await?;
				Ok(ReorderOutcome::Reverted)
			}
		}
	}

	/// Moves the row at `from` to position `to`.
	pub async fn move_row(&mut self, from: usize, to: usize) -> AdminResult<ReorderOutcome> {
		let ids = self.source.collection().ids(&self.id_column);
		let order = order_after_move(&ids, from, to)
			.ok_or_else(|| AdminError::RecordNotFound(format!("row {}", from.max(to))))?;
		self.reorder(order).await
	}

	/// Connects a listener called after every list render.
	pub fn on_list_rendered<F>(&self, listener: F)
	where
		F: Fn(&ListRendered) + Send + Sync + 'static,
	{
		self.listeners.connect(listener);
	}

	/// Listeners of this widget.
	pub fn listeners(&self) -> &ListListeners {
		&self.listeners
	}

	/// The collection the widget lists.
	pub fn collection(&self) -> Collection {
		self.source.collection()
	}

	/// The last rendered screen.
	pub fn current_view(&self) -> &View {
		&self.current
	}

	/// The last rendered screen as HTML.
	pub fn current_html(&self) -> String {
		self.current.render_to_string()
	}

	/// Columns in display order.
	pub fn schema(&self) -> &[Column] {
		&self.schema
	}

	/// Identifier field.
	pub fn id_column(&self) -> &str {
		&self.id_column
	}

	/// Registry resolving the schema's types.
	pub fn registry(&self) -> &TypeRegistry {
		&self.registry
	}

	/// Returns true in local mode.
	pub fn is_local(&self) -> bool {
		self.source.is_local()
	}

	fn context(&self) -> ControlContext {
		ControlContext {
			registry: self.registry.clone(),
			editor_factory: self.editor_factory.clone(),
			confirm: self.confirm.clone(),
		}
	}

	fn place(&mut self, view: View) -> String {
		let html = view.render_to_string();
		if let Some(container) = &self.container {
			container.mount(&view);
		}
		self.current = view;
		html
	}
}

#[cfg(feature = "http")]
fn default_transport() -> AdminResult<Arc<dyn Transport>> {
	Ok(Arc::new(crate::transport::HttpTransport::new()?))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> AdminResult<Arc<dyn Transport>> {
	Err(rest_admin_types::TransportError::Request(
		"no transport configured and the http feature is disabled".to_string(),
	)
	.into())
}

impl fmt::Debug for RestAdmin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RestAdmin")
			.field("schema", &self.schema)
			.field("id_column", &self.id_column)
			.field("sortable", &self.sortable)
			.field("local", &self.source.is_local())
			.field("editing", &self.is_editing())
			.finish_non_exhaustive()
	}
}
