//! # rest-admin-types
//!
//! Shared data model for rest-admin.
//!
//! - **value**: [`Value`], the dynamically typed field value
//! - **record**: [`Record`], one row of administered data
//! - **collection**: [`Collection`], a shared, mutably aliased ordered list of records
//! - **schema**: [`Column`] and [`Choice`], the declarative description of a field
//! - **errors**: [`AdminError`] and friends
//!
//! These types carry no rendering or transport logic. They are shared by
//! `rest-admin-pages` and `rest-admin-core`.

#![warn(missing_docs)]

pub mod collection;
pub mod errors;
pub mod record;
pub mod schema;
pub mod value;

pub use collection::Collection;
pub use errors::{
	AdminError, AdminResult, TransportError, ValidationFailure, Violation, ViolationKind,
};
pub use record::Record;
pub use schema::{Choice, Column, DeleteValidator, NestedOptions};
pub use value::Value;

/// Default name of the identifier field.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Prefix of identifiers assigned to records created in local mode.
///
/// External code can use it to recognize records the remote side has never seen.
pub const TEMP_ID_PREFIX: &str = "_temp_";
