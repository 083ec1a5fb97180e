use super::DataSource;
use crate::transport::{Method, Transport, TransportRequest};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rest_admin_types::{
	AdminError, AdminResult, Collection, Record, TransportError, Value,
};
use serde_json::json;
use std::fmt;
use std::sync::Arc;

/// Characters escaped in a record identifier used as a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// Source backed by a collection endpoint at a base URL `U`.
///
/// | action  | request                          |
/// |---------|----------------------------------|
/// | load    | `GET U`                          |
/// | create  | `POST U` with the record         |
/// | update  | `PUT U/{id}` with the record     |
/// | remove  | `DELETE U/{id}`                  |
/// | reorder | `PUT U/rank` with `{"order": [..]}` |
pub struct RemoteDataSource {
	url: String,
	id_column: String,
	transport: Arc<dyn Transport>,
	collection: Collection,
}

impl RemoteDataSource {
	/// Creates a source for the endpoint at `url`.
	///
	/// `collection` holds the records shown until the first refresh.
	pub fn new(
		url: impl Into<String>,
		id_column: impl Into<String>,
		transport: Arc<dyn Transport>,
		collection: Collection,
	) -> Self {
		Self {
			url: url.into().trim_end_matches('/').to_string(),
			id_column: id_column.into(),
			transport,
			collection,
		}
	}

	/// Base URL of the endpoint.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// URL addressing one record.
	pub fn record_url(&self, record: &Record) -> AdminResult<String> {
		let id = record
			.id(&self.id_column)
			.ok_or_else(|| AdminError::MissingIdentifier(self.id_column.clone()))?;
		Ok(format!(
			"{}/{}",
			self.url,
			utf8_percent_encode(&id.path_segment(), PATH_SEGMENT)
		))
	}

	/// URL of the reorder endpoint.
	pub fn rank_url(&self) -> String {
		format!("{}/rank", self.url)
	}

	async fn send(&self, request: TransportRequest) -> AdminResult<serde_json::Value> {
		let method = request.method;
		let url = request.url.clone();
		match self.transport.send(request).await {
			Ok(body) => Ok(body),
			Err(e) => {
				tracing::warn!(method = %method, url = %url, error = %e, "Collection endpoint call failed");
				Err(AdminError::Transport(e))
			}
		}
	}
}

/// Interprets a create/update response.
///
/// Endpoints answering with the stored record win; anything else keeps the
/// submitted record.
fn stored_record(response: serde_json::Value, submitted: Record) -> Record {
	match response {
		serde_json::Value::Object(map) => Record::from(map),
		_ => submitted,
	}
}

#[async_trait]
impl DataSource for RemoteDataSource {
	fn collection(&self) -> Collection {
		self.collection.clone()
	}

	fn is_local(&self) -> bool {
		false
	}

	async fn load(&self) -> AdminResult<Vec<Record>> {
		let body = self
			.send(TransportRequest::new(Method::Get, self.url.clone()))
			.await?;
		let serde_json::Value::Array(items) = body else {
			return Err(TransportError::Decode("expected an array of records".to_string()).into());
		};
		items
			.into_iter()
			.map(|item| match item {
				serde_json::Value::Object(map) => Ok(Record::from(map)),
				other => Err(AdminError::from(TransportError::Decode(format!(
					"expected a record, got {}",
					other
				)))),
			})
			.collect()
	}

	async fn refresh(&self) -> AdminResult<()> {
		let records = self.load().await?;
		tracing::debug!(url = %self.url, count = records.len(), "Refreshed collection");
		self.collection.replace_all(records);
		Ok(())
	}

	async fn create(&self, record: Record) -> AdminResult<Record> {
		let request =
			TransportRequest::new(Method::Post, self.url.clone()).with_body(record.to_json());
		let response = self.send(request).await?;
		Ok(stored_record(response, record))
	}

	async fn update(&self, record: Record) -> AdminResult<Record> {
		let request =
			TransportRequest::new(Method::Put, self.record_url(&record)?).with_body(record.to_json());
		let response = self.send(request).await?;
		Ok(stored_record(response, record))
	}

	async fn remove(&self, record: &Record) -> AdminResult<()> {
		let request = TransportRequest::new(Method::Delete, self.record_url(record)?);
		self.send(request).await?;
		Ok(())
	}

	async fn reorder(&self, order: &[Value]) -> AdminResult<()> {
		let order: Vec<serde_json::Value> = order.iter().map(Value::to_json).collect();
		let request =
			TransportRequest::new(Method::Put, self.rank_url()).with_body(json!({ "order": order }));
		self.send(request).await?;
		Ok(())
	}
}

impl fmt::Debug for RemoteDataSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RemoteDataSource")
			.field("url", &self.url)
			.field("id_column", &self.id_column)
			.field("collection", &self.collection)
			.finish_non_exhaustive()
	}
}
