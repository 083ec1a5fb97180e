use super::DataSource;
use async_trait::async_trait;
use rest_admin_types::{AdminResult, Collection, Record, TEMP_ID_PREFIX, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source over a caller-owned collection.
///
/// Every action mutates the collection in place, so whoever else holds the
/// handle sees the change.
#[derive(Debug)]
pub struct LocalDataSource {
	collection: Collection,
	id_column: String,
	next_temp_id: AtomicU64,
}

impl LocalDataSource {
	/// Creates a source over `collection`.
	pub fn new(collection: Collection, id_column: impl Into<String>) -> Self {
		Self {
			collection,
			id_column: id_column.into(),
			next_temp_id: AtomicU64::new(1),
		}
	}

	/// Returns the next `_temp_<n>` identifier not already in use.
	fn next_temp_id(&self) -> Value {
		loop {
			let n = self.next_temp_id.fetch_add(1, Ordering::Relaxed);
			let id = Value::from(format!("{}{}", TEMP_ID_PREFIX, n));
			if !self.collection.contains_id(&self.id_column, &id) {
				return id;
			}
		}
	}
}

#[async_trait]
impl DataSource for LocalDataSource {
	fn collection(&self) -> Collection {
		self.collection.clone()
	}

	fn is_local(&self) -> bool {
		true
	}

	async fn load(&self) -> AdminResult<Vec<Record>> {
		Ok(self.collection.snapshot())
	}

	async fn refresh(&self) -> AdminResult<()> {
		Ok(())
	}

	async fn create(&self, mut record: Record) -> AdminResult<Record> {
		let id = self.next_temp_id();
		tracing::debug!(id = %id, "Creating local record");
		record.set(self.id_column.clone(), id);
		self.collection.push(record.clone());
		Ok(record)
	}

	async fn update(&self, record: Record) -> AdminResult<Record> {
		if !self.collection.replace_by_id(&self.id_column, record.clone()) {
			tracing::debug!(
				id = %record.value(&self.id_column),
				"Local update found no record with this id"
			);
		}
		Ok(record)
	}

	async fn remove(&self, record: &Record) -> AdminResult<()> {
		let id = record.value(&self.id_column);
		if self.collection.remove_by_id(&self.id_column, &id).is_none() {
			tracing::debug!(id = %id, "Local remove found no record with this id");
		}
		Ok(())
	}

	async fn reorder(&self, order: &[Value]) -> AdminResult<()> {
		self.collection.reorder_by_ids(&self.id_column, order);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn abc() -> Collection {
		Collection::from_records(vec![
			Record::new().with("id", "a").with("name", "A"),
			Record::new().with("id", "b").with("name", "B"),
			Record::new().with("id", "c").with("name", "C"),
		])
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_assigns_unique_temp_ids(abc: Collection) {
		abc.push(Record::new().with("id", "_temp_1"));
		let source = LocalDataSource::new(abc.clone(), "id");

		let first = source.create(Record::new().with("name", "D")).await.unwrap();
		let second = source.create(Record::new().with("name", "E")).await.unwrap();

		let first_id = first.value("id");
		assert!(first_id.as_str().unwrap().starts_with(TEMP_ID_PREFIX));
		assert_eq!(first_id, Value::from("_temp_2"));
		assert_eq!(second.value("id"), Value::from("_temp_3"));
		assert_eq!(abc.len(), 6);
		assert!(source.collection().ptr_eq(&abc));
	}

	#[rstest]
	#[tokio::test]
	async fn test_update_replaces_in_place(abc: Collection) {
		let source = LocalDataSource::new(abc.clone(), "id");
		source
			.update(Record::new().with("id", "b").with("name", "Bee"))
			.await
			.unwrap();
		assert_eq!(abc.get(1).unwrap().value("name"), Value::from("Bee"));
		assert_eq!(abc.len(), 3);
	}

	#[rstest]
	#[tokio::test]
	async fn test_remove_preserves_order_and_identity(abc: Collection) {
		let source = LocalDataSource::new(abc.clone(), "id");
		source.remove(&Record::new().with("id", "b")).await.unwrap();

		assert_eq!(abc.ids("id"), vec![Value::from("a"), Value::from("c")]);
		assert!(source.collection().ptr_eq(&abc));

		source.remove(&Record::new().with("id", "zz")).await.unwrap();
		assert_eq!(abc.len(), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_reorder(abc: Collection) {
		let source = LocalDataSource::new(abc.clone(), "id");
		source
			.reorder(&[Value::from("c"), Value::from("a"), Value::from("b")])
			.await
			.unwrap();
		assert_eq!(
			abc.ids("id"),
			vec![Value::from("c"), Value::from("a"), Value::from("b")]
		);
		assert!(source.collection().ptr_eq(&abc));
	}

	#[rstest]
	#[tokio::test]
	async fn test_refresh_keeps_contents(abc: Collection) {
		let source = LocalDataSource::new(abc.clone(), "id");
		source.refresh().await.unwrap();
		assert_eq!(source.load().await.unwrap().len(), 3);
	}
}
