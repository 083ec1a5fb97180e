//! # rest-admin
//!
//! A schema-driven data-table administration widget.
//!
//! Given a schema of columns and a source of records, a [`RestAdmin`]
//! renders a sortable list and a per-record edit form, and synchronizes
//! edits either with a REST collection endpoint or with an in-memory
//! [`Collection`] shared with the embedding code.
//!
//! ## Crates
//!
//! - [`types`]: values, records, collections, schema and errors
//! - [`pages`]: the headless view tree and render targets
//! - [`engine`]: type registry, data sources, list and form engine
//!
//! ## Feature Flags
//!
//! - `http` (default): the reqwest-based transport used by remote mode
//!   when no transport is configured
//!
//! ## Quick Example
//!
//! ```rust
//! use rest_admin::prelude::*;
//!
//! # async fn run() -> AdminResult<()> {
//! let tags = Collection::new();
//! let mut admin = RestAdmin::new(
//!     AdminOptions::new(vec![
//!         Column::new("name", "text").label("Name").required(true).unique(true),
//!         Column::new("featured", "checkbox").label("Featured"),
//!     ])
//!     .with_local(true)
//!     .with_data(tags.clone()),
//! )?;
//! admin.mount().await?;
//!
//! admin.new_record()?;
//! if let Some(control) = admin.session_mut()?.control_mut("name") {
//!     control.set_text("rust")?;
//! }
//! admin.save().await?;
//!
//! assert_eq!(tags.len(), 1);
//! assert!(admin.current_html().contains("rust"));
//! # Ok(())
//! # }
//! ```

pub use rest_admin_core as engine;
pub use rest_admin_pages as pages;
pub use rest_admin_types as types;

pub use rest_admin_core::{
	ActionOverrides, AdminOptions, AdminSettings, DeleteOutcome, ReorderOutcome, RestAdmin,
	TypeOverride, TypeRegistry,
};
pub use rest_admin_types::{AdminError, AdminResult, Collection, Column, Record, Value};

/// Everything needed to configure and drive a widget.
pub mod prelude {
	pub use rest_admin_core::{
		ActionOverrides, AdminOptions, AdminSettings, AlwaysConfirm, ConfirmPrompt, Control,
		DeleteOutcome, ListRendered, ReorderOutcome, RestAdmin, Transport, TransportRequest,
		TypeOverride, TypeRegistry, Widget,
	};
	pub use rest_admin_pages::{Container, ElementView, HtmlContainer, IntoView, View};
	pub use rest_admin_types::{
		AdminError, AdminResult, Choice, Collection, Column, NestedOptions, Record,
		TransportError, Value,
	};

	#[cfg(feature = "http")]
	pub use rest_admin_core::HttpTransport;

	pub use async_trait::async_trait;
}
