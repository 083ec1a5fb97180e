//! Data sources.
//!
//! A [`DataSource`] performs the CRUD actions of one widget. The widget
//! never cares which kind it holds:
//!
//! - [`LocalDataSource`] mutates a caller-owned [`Collection`] in place;
//! - [`RemoteDataSource`] calls a collection endpoint through a
//!   [`Transport`](crate::transport::Transport) and caches the last loaded
//!   records in its collection;
//! - [`OverriddenSource`] replaces single actions of another source with
//!   caller-provided closures ([`ActionOverrides`]).
//!
//! Every action is async, local ones included.

mod local;
mod overrides;
mod remote;

pub use local::LocalDataSource;
pub use overrides::{
	ActionOverrides, LoadAction, OverriddenSource, RankAction, RecordAction, RefreshAction,
	RemoveAction,
};
pub use remote::RemoteDataSource;

use async_trait::async_trait;
use rest_admin_types::{AdminResult, Collection, Record, Value};

/// CRUD actions over one record collection.
#[async_trait]
pub trait DataSource: Send + Sync {
	/// The collection the widget lists.
	///
	/// The handle is stable for the lifetime of the source: refreshes and
	/// mutations change its contents, never its identity.
	fn collection(&self) -> Collection;

	/// Returns true if the source works on caller-owned data.
	fn is_local(&self) -> bool;

	/// Fetches the current records without touching the collection.
	async fn load(&self) -> AdminResult<Vec<Record>>;

	/// Brings the collection up to date.
	async fn refresh(&self) -> AdminResult<()>;

	/// Creates a record and returns it as stored.
	async fn create(&self, record: Record) -> AdminResult<Record>;

	/// Updates the record carrying the same identifier.
	async fn update(&self, record: Record) -> AdminResult<Record>;

	/// Deletes a record.
	async fn remove(&self, record: &Record) -> AdminResult<()>;

	/// Persists a new order, given as the identifiers of every record.
	async fn reorder(&self, order: &[Value]) -> AdminResult<()>;
}
