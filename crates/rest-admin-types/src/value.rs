//! Dynamically typed field values

use crate::collection::Collection;
use crate::record::Record;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number};
use std::fmt;

/// A field value stored in a [`Record`].
///
/// Mirrors JSON, with one addition: arrays of objects are held as a
/// [`Collection`] so that nested admins can mutate them by reference while
/// the parent record keeps seeing the same list.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Absent or null value
	#[default]
	Null,
	/// Boolean value
	Bool(bool),
	/// Numeric value
	Number(Number),
	/// String value
	String(String),
	/// Array whose items are not all objects
	Array(Vec<serde_json::Value>),
	/// Plain object (for example a related record bound to a select)
	Object(Map<String, serde_json::Value>),
	/// Shared list of records
	Collection(Collection),
}

impl Value {
	/// Returns whether the value counts as "filled in".
	///
	/// `Null`, `false`, `0`, NaN and the empty string are falsy. Everything
	/// else is truthy, including empty collections and empty objects.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
			Value::String(s) => !s.is_empty(),
			Value::Array(_) | Value::Object(_) | Value::Collection(_) => true,
		}
	}

	/// Strict equality: same kind and same content.
	///
	/// Numbers compare numerically, so `1` and `1.0` are equal. Collections
	/// compare by handle identity.
	pub fn strict_eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
				(Some(x), Some(y)) => x == y,
				_ => a == b,
			},
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => a == b,
			(Value::Collection(a), Value::Collection(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	/// Returns true for `Value::Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the string slice if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the boolean if this is a boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns true for `Value::Collection`.
	pub fn is_collection(&self) -> bool {
		matches!(self, Value::Collection(_))
	}

	/// Returns the collection handle if this is a collection.
	pub fn as_collection(&self) -> Option<&Collection> {
		match self {
			Value::Collection(c) => Some(c),
			_ => None,
		}
	}

	/// Returns the value as a list of records.
	///
	/// Collections yield their shared handle. Arrays whose items are all
	/// objects, including the empty array, yield a new collection holding
	/// those records. Anything else yields `None`.
	pub fn to_collection(&self) -> Option<Collection> {
		match self {
			Value::Collection(c) => Some(c.clone()),
			Value::Array(items) if items.iter().all(serde_json::Value::is_object) => {
				let records = items
					.iter()
					.filter_map(|item| item.as_object().cloned().map(Record::from))
					.collect();
				Some(Collection::from_records(records))
			}
			_ => None,
		}
	}

	/// Returns the object map if this is an object.
	pub fn as_object(&self) -> Option<&Map<String, serde_json::Value>> {
		match self {
			Value::Object(map) => Some(map),
			_ => None,
		}
	}

	/// Looks up a field of an object value.
	///
	/// Returns `Value::Null` for non-objects and missing fields.
	pub fn field(&self, name: &str) -> Value {
		match self {
			Value::Object(map) => map.get(name).cloned().map(Value::from).unwrap_or_default(),
			_ => Value::Null,
		}
	}

	/// Renders the value as plain display text.
	pub fn display_text(&self) -> String {
		match self {
			Value::Null => String::new(),
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
			Value::String(s) => s.clone(),
			Value::Array(_) | Value::Object(_) | Value::Collection(_) => self.to_json().to_string(),
		}
	}

	/// Renders the value as a URL path segment or attribute value.
	///
	/// Identical to [`Value::display_text`] except that it is meant for
	/// identifiers, which are normally strings or numbers.
	pub fn path_segment(&self) -> String {
		self.display_text()
	}

	/// Converts to a `serde_json::Value`, snapshotting collections.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(*b),
			Value::Number(n) => serde_json::Value::Number(n.clone()),
			Value::String(s) => serde_json::Value::String(s.clone()),
			Value::Array(items) => serde_json::Value::Array(items.clone()),
			Value::Object(map) => serde_json::Value::Object(map.clone()),
			Value::Collection(c) => {
				serde_json::Value::Array(c.snapshot().iter().map(Record::to_json).collect())
			}
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.strict_eq(other)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.display_text())
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => Value::Number(n),
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Object(map) => Value::Object(map),
			serde_json::Value::Array(items) => {
				if !items.is_empty() && items.iter().all(serde_json::Value::is_object) {
					let records = items
						.into_iter()
						.filter_map(|item| match item {
							serde_json::Value::Object(map) => Some(Record::from(map)),
							_ => None,
						})
						.collect();
					Value::Collection(Collection::from_records(records))
				} else {
					Value::Array(items)
				}
			}
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(Number::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(Number::from(value))
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::Number(Number::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Number::from_f64(value).map(Value::Number).unwrap_or_default()
	}
}

impl From<Collection> for Value {
	fn from(value: Collection) -> Self {
		Value::Collection(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or_default()
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		serde_json::Value::deserialize(deserializer).map(Value::from)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Value::Null, false)]
	#[case(Value::Bool(false), false)]
	#[case(Value::Bool(true), true)]
	#[case(Value::from(0), false)]
	#[case(Value::from(0.0), false)]
	#[case(Value::from(3), true)]
	#[case(Value::from(""), false)]
	#[case(Value::from("x"), true)]
	#[case(Value::Collection(Collection::new()), true)]
	fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(value.is_truthy(), expected);
	}

	#[rstest]
	fn test_strict_eq_distinguishes_kinds() {
		assert!(Value::from(1).strict_eq(&Value::from(1.0)));
		assert!(!Value::from(1).strict_eq(&Value::from("1")));
		assert!(!Value::Null.strict_eq(&Value::from("")));
	}

	#[rstest]
	fn test_collections_compare_by_identity() {
		let a = Collection::new();
		let b = Collection::new();
		assert_eq!(Value::Collection(a.clone()), Value::Collection(a));
		assert_ne!(Value::Collection(b), Value::Collection(Collection::new()));
	}

	#[rstest]
	fn test_array_of_objects_becomes_collection() {
		let value = Value::from(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
		let collection = value.as_collection().unwrap();
		assert_eq!(collection.len(), 2);
		assert_eq!(value.to_json(), json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
	}

	#[rstest]
	fn test_scalar_array_stays_array() {
		let value = Value::from(json!([1, 2, 3]));
		assert!(matches!(value, Value::Array(_)));
	}

	#[rstest]
	fn test_to_collection() {
		let empty = Value::from(json!([]));
		assert!(matches!(empty, Value::Array(_)));
		assert!(empty.to_collection().unwrap().is_empty());

		let shared = Collection::new();
		assert!(Value::Collection(shared.clone()).to_collection().unwrap().ptr_eq(&shared));
		assert!(Value::from(json!([1, 2])).to_collection().is_none());
		assert!(Value::Null.to_collection().is_none());
	}

	#[rstest]
	fn test_object_field_lookup() {
		let value = Value::from(json!({"value": 7, "label": "Seven"}));
		assert_eq!(value.field("value"), Value::from(7));
		assert_eq!(value.field("missing"), Value::Null);
		assert_eq!(Value::from("plain").field("value"), Value::Null);
	}

	#[rstest]
	fn test_display_text() {
		assert_eq!(Value::Null.display_text(), "");
		assert_eq!(Value::from(42).display_text(), "42");
		assert_eq!(Value::from("Hello").display_text(), "Hello");
		assert_eq!(Value::from(true).display_text(), "true");
	}
}
