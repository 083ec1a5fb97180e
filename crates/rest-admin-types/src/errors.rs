//! Error types for rest-admin

use std::fmt;
use thiserror::Error;

/// Kind of a flagged column violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
	/// The column is required and its value is falsy
	Required,
	/// Another record already holds this value
	Unique,
	/// The column's delete validator rejected the deletion
	DeleteGuard,
}

impl fmt::Display for ViolationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ViolationKind::Required => "required",
			ViolationKind::Unique => "unique",
			ViolationKind::DeleteGuard => "delete guard",
		})
	}
}

/// A single flagged column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	/// Column name
	pub column: String,
	/// What was violated
	pub kind: ViolationKind,
}

impl Violation {
	/// Creates a violation.
	pub fn new(column: impl Into<String>, kind: ViolationKind) -> Self {
		Self {
			column: column.into(),
			kind,
		}
	}
}

/// Every violation found during one save or delete attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
	/// Violations in schema order
	pub violations: Vec<Violation>,
}

impl ValidationFailure {
	/// Returns true if no violation was recorded.
	pub fn is_empty(&self) -> bool {
		self.violations.is_empty()
	}

	/// Records a violation.
	pub fn push(&mut self, column: impl Into<String>, kind: ViolationKind) {
		self.violations.push(Violation::new(column, kind));
	}

	/// Returns true if the column was flagged for any reason.
	pub fn is_flagged(&self, column: &str) -> bool {
		self.violations.iter().any(|v| v.column == column)
	}

	/// Names of all flagged columns, without duplicates.
	pub fn columns(&self) -> Vec<&str> {
		let mut columns: Vec<&str> = Vec::new();
		for violation in &self.violations {
			if !columns.contains(&violation.column.as_str()) {
				columns.push(&violation.column);
			}
		}
		columns
	}
}

impl fmt::Display for ValidationFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<String> = self
			.violations
			.iter()
			.map(|v| format!("{} ({})", v.column, v.kind))
			.collect();
		write!(f, "{}", parts.join(", "))
	}
}

/// Failure of a collection endpoint call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
	/// The request could not be sent or no response arrived
	#[error("Request failed: {0}")]
	Request(String),

	/// The endpoint answered with a non-success status
	#[error("Endpoint returned status {status}: {body}")]
	Status {
		/// HTTP status code
		status: u16,
		/// Response body, possibly empty
		body: String,
	},

	/// The response body was not the expected JSON
	#[error("Could not decode response: {0}")]
	Decode(String),
}

/// rest-admin error type
#[derive(Debug, Error)]
pub enum AdminError {
	/// A column references a type name the registry does not know
	#[error("Unknown column type '{0}'")]
	UnknownType(String),

	/// Required, unique or delete-guard violations
	#[error("Validation failed: {0}")]
	Validation(ValidationFailure),

	/// Remote call failed
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// An edit operation was requested while no form is open
	#[error("No edit session is active")]
	NoActiveSession,

	/// No record carries the requested identifier
	#[error("Record '{0}' not found")]
	RecordNotFound(String),

	/// Reorder was requested on a widget that is not sortable
	#[error("Sorting is not enabled")]
	SortingDisabled,

	/// Remote mode without an endpoint URL
	#[error("Remote mode requires a url")]
	MissingUrl,

	/// A control does not have the shape the type expects
	#[error("Control for column '{column}' is not a {expected}")]
	ControlMismatch {
		/// Column name
		column: String,
		/// Expected control kind
		expected: &'static str,
	},

	/// A nested admin column holds something other than a list of records
	#[error("Column '{0}' does not hold a list of records")]
	NotACollection(String),

	/// A record lacks its identifier field
	#[error("Record has no identifier in column '{0}'")]
	MissingIdentifier(String),

	/// Declarative settings could not be loaded
	#[error("Settings error: {0}")]
	Settings(String),
}

impl From<ValidationFailure> for AdminError {
	fn from(failure: ValidationFailure) -> Self {
		AdminError::Validation(failure)
	}
}

impl AdminError {
	/// Returns the validation failure, if this is one.
	pub fn as_validation(&self) -> Option<&ValidationFailure> {
		match self {
			AdminError::Validation(failure) => Some(failure),
			_ => None,
		}
	}
}

/// Result type for rest-admin operations
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_failure_columns_are_deduplicated() {
		let mut failure = ValidationFailure::default();
		failure.push("title", ViolationKind::Required);
		failure.push("title", ViolationKind::Unique);
		failure.push("slug", ViolationKind::Unique);
		assert_eq!(failure.columns(), vec!["title", "slug"]);
		assert!(failure.is_flagged("slug"));
		assert!(!failure.is_flagged("body"));
	}

	#[rstest]
	fn test_error_messages() {
		let mut failure = ValidationFailure::default();
		failure.push("title", ViolationKind::Required);
		assert_eq!(
			AdminError::from(failure).to_string(),
			"Validation failed: title (required)"
		);
		let transport = TransportError::Status {
			status: 500,
			body: "boom".to_string(),
		};
		assert_eq!(
			AdminError::from(transport).to_string(),
			"Endpoint returned status 500: boom"
		);
	}
}
