//! # rest-admin-core
//!
//! Engine of the rest-admin widget.
//!
//! - **registry**: column types and how they summarize, edit and default values
//! - **control**: the editable controls built for a form
//! - **source**: local and remote data sources and per-action overrides
//! - **transport**: the request seam used by the remote source
//! - **list**: the list screen
//! - **form**: edit sessions, validation and delete guards
//! - **admin**: [`RestAdmin`], the controller tying them together
//! - **settings**: TOML/JSON configuration
//!
//! ## Example
//!
//! ```rust
//! use rest_admin_core::{AdminOptions, RestAdmin};
//! use rest_admin_types::{Collection, Column, Record};
//!
//! # async fn run() -> rest_admin_types::AdminResult<()> {
//! let data = Collection::new();
//! let options = AdminOptions::new(vec![Column::new("title", "text").required(true)])
//!     .with_local(true)
//!     .with_data(data.clone());
//!
//! let mut admin = RestAdmin::new(options)?;
//! admin.mount().await?;
//! admin.new_record()?;
//! admin
//!     .session_mut()?
//!     .control_mut("title")
//!     .expect("title control")
//!     .set_text("First post")?;
//! admin.save().await?;
//!
//! assert_eq!(data.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod confirm;
pub mod control;
pub mod form;
pub mod list;
pub mod notify;
pub mod options;
pub mod registry;
pub mod settings;
pub mod source;
pub mod transport;

pub use admin::{DeleteOutcome, ReorderOutcome, RestAdmin};
pub use confirm::{AlwaysConfirm, ConfirmPrompt, DEFAULT_REMOVE_CONFIRM};
pub use control::{Control, CustomWidget, SelectOption, Widget};
pub use form::{EditSession, SessionState};
pub use list::ListView;
pub use notify::{ListListeners, ListRendered};
pub use options::AdminOptions;
pub use registry::{ControlContext, TypeBehavior, TypeOverride, TypeRegistry};
pub use settings::{AdminSettings, ColumnSettings, NestedSettings, SettingsError};
pub use source::{ActionOverrides, DataSource, LocalDataSource, RemoteDataSource};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{HttpTransportConfig, Method, Transport, TransportRequest};
