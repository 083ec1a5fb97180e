//! Shared, in-place mutable record collections

use crate::record::Record;
use crate::value::Value;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An ordered list of records behind a shared handle.
///
/// Cloning a `Collection` clones the handle, not the records: every clone
/// observes the same storage. All mutating methods work in place and never
/// swap the underlying storage, so an embedder holding a clone sees every
/// change made through another clone.
#[derive(Clone, Default)]
pub struct Collection {
	inner: Arc<RwLock<Vec<Record>>>,
}

impl Collection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a collection holding the given records.
	pub fn from_records(records: Vec<Record>) -> Self {
		Self {
			inner: Arc::new(RwLock::new(records)),
		}
	}

	/// Returns true if both handles point at the same storage.
	pub fn ptr_eq(&self, other: &Collection) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Number of records.
	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	/// Runs `f` with shared access to the records.
	pub fn read<R>(&self, f: impl FnOnce(&[Record]) -> R) -> R {
		f(&self.inner.read())
	}

	/// Runs `f` with exclusive access to the records.
	pub fn write<R>(&self, f: impl FnOnce(&mut Vec<Record>) -> R) -> R {
		f(&mut self.inner.write())
	}

	/// Clones the current records.
	pub fn snapshot(&self) -> Vec<Record> {
		self.inner.read().clone()
	}

	/// Returns a copy of the record at `index`.
	pub fn get(&self, index: usize) -> Option<Record> {
		self.inner.read().get(index).cloned()
	}

	/// Identifiers of all records in order. Records without one yield `Null`.
	pub fn ids(&self, id_column: &str) -> Vec<Value> {
		self.read(|records| {
			records
				.iter()
				.map(|r| r.id(id_column).cloned().unwrap_or_default())
				.collect()
		})
	}

	/// Position of the record with the given identifier.
	pub fn position_of(&self, id_column: &str, id: &Value) -> Option<usize> {
		self.read(|records| {
			records
				.iter()
				.position(|r| r.id(id_column).is_some_and(|v| v.strict_eq(id)))
		})
	}

	/// Returns true if a record with the given identifier exists.
	pub fn contains_id(&self, id_column: &str, id: &Value) -> bool {
		self.position_of(id_column, id).is_some()
	}

	/// Returns a copy of the record with the given identifier.
	pub fn find_by_id(&self, id_column: &str, id: &Value) -> Option<Record> {
		self.read(|records| {
			records
				.iter()
				.find(|r| r.id(id_column).is_some_and(|v| v.strict_eq(id)))
				.cloned()
		})
	}

	/// Appends a record.
	pub fn push(&self, record: Record) {
		self.inner.write().push(record);
	}

	/// Overwrites the record carrying the same identifier as `record`.
	///
	/// Returns false when no such record exists.
	pub fn replace_by_id(&self, id_column: &str, record: Record) -> bool {
		let Some(id) = record.id(id_column).cloned() else {
			return false;
		};
		let mut records = self.inner.write();
		match records
			.iter_mut()
			.find(|r| r.id(id_column).is_some_and(|v| v.strict_eq(&id)))
		{
			Some(slot) => {
				*slot = record;
				true
			}
			None => false,
		}
	}

	/// Removes the record with the given identifier, keeping the relative
	/// order of the others.
	pub fn remove_by_id(&self, id_column: &str, id: &Value) -> Option<Record> {
		let mut records = self.inner.write();
		let index = records
			.iter()
			.position(|r| r.id(id_column).is_some_and(|v| v.strict_eq(id)))?;
		Some(records.remove(index))
	}

	/// Rebuilds the contents in the given identifier order.
	///
	/// Identifiers that match no record are skipped. Records whose
	/// identifier is not mentioned keep their relative order after the
	/// ordered ones.
	pub fn reorder_by_ids(&self, id_column: &str, order: &[Value]) {
		let mut records = self.inner.write();
		let mut remaining: Vec<Option<Record>> = records.drain(..).map(Some).collect();
		for id in order {
			let slot = remaining.iter_mut().find(|slot| {
				slot.as_ref()
					.and_then(|r| r.id(id_column))
					.is_some_and(|v| v.strict_eq(id))
			});
			if let Some(record) = slot.and_then(Option::take) {
				records.push(record);
			}
		}
		records.extend(remaining.into_iter().flatten());
	}

	/// Replaces all records in place.
	pub fn replace_all(&self, new_records: Vec<Record>) {
		let mut records = self.inner.write();
		records.clear();
		records.extend(new_records);
	}
}

impl PartialEq for Collection {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Collection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.inner.read().iter()).finish()
	}
}

impl Serialize for Collection {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.inner.read().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Collection {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Vec::<Record>::deserialize(deserializer).map(Collection::from_records)
	}
}
