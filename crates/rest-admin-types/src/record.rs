//! Records: one row of administered data

use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Map;
use std::collections::BTreeMap;

/// An open-ended mapping from field name to [`Value`].
///
/// A record is addressed by its identifier field, whose name is configured
/// per admin (see [`crate::DEFAULT_ID_COLUMN`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
	fields: BTreeMap<String, Value>,
}

impl Record {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value of a field, if present.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Returns the value of a field, or `Value::Null` when absent.
	pub fn value(&self, name: &str) -> Value {
		self.fields.get(name).cloned().unwrap_or_default()
	}

	/// Sets a field, returning the previous value.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.fields.insert(name.into(), value.into())
	}

	/// Builder-style variant of [`Record::set`].
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(name, value);
		self
	}

	/// Removes a field.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.fields.remove(name)
	}

	/// Returns whether the field is present.
	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Returns the identifier value, treating `Null` as missing.
	pub fn id(&self, id_column: &str) -> Option<&Value> {
		self.fields.get(id_column).filter(|v| !v.is_null())
	}

	/// Returns true if both records carry the same identifier.
	///
	/// Two records without identifiers are considered the same record.
	pub fn same_id(&self, other: &Record, id_column: &str) -> bool {
		match (self.id(id_column), other.id(id_column)) {
			(Some(a), Some(b)) => a.strict_eq(b),
			(None, None) => true,
			_ => false,
		}
	}

	/// Iterates over fields in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.fields.iter()
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if the record has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Converts to a JSON object, snapshotting nested collections.
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::Value::Object(
			self.fields
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect(),
		)
	}
}

impl From<Map<String, serde_json::Value>> for Record {
	fn from(map: Map<String, serde_json::Value>) -> Self {
		Self {
			fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
		}
	}
}

impl<K, V> FromIterator<(K, V)> for Record
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			fields: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl Serialize for Record {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.fields.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Record {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Map::<String, serde_json::Value>::deserialize(deserializer).map(Record::from)
	}
}
