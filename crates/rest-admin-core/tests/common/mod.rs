//! In-memory collection endpoint shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rest_admin_core::transport::{Method, Transport, TransportRequest};
use rest_admin_types::TransportError;
use serde_json::{Value as Json, json};
use std::sync::Arc;

pub const BASE_URL: &str = "/admin/posts";

#[derive(Default)]
struct Endpoint {
	records: Vec<Json>,
	next_id: u64,
	failing: Vec<Method>,
	requests: Vec<TransportRequest>,
}

/// A REST collection at [`BASE_URL`] holding JSON records keyed by `id`.
#[derive(Clone, Default)]
pub struct FakeEndpoint {
	state: Arc<Mutex<Endpoint>>,
}

impl FakeEndpoint {
	pub fn with_records(records: Vec<Json>) -> Self {
		let endpoint = Self::default();
		{
			let mut state = endpoint.state.lock();
			state.next_id = records.len() as u64 + 1;
			state.records = records;
		}
		endpoint
	}

	/// Makes every request with `method` answer 500.
	pub fn fail(&self, method: Method) {
		self.state.lock().failing.push(method);
	}

	pub fn records(&self) -> Vec<Json> {
		self.state.lock().records.clone()
	}

	pub fn requests(&self) -> Vec<(Method, String)> {
		self.state
			.lock()
			.requests
			.iter()
			.map(|r| (r.method, r.url.clone()))
			.collect()
	}

	pub fn count(&self, method: Method) -> usize {
		self.state
			.lock()
			.requests
			.iter()
			.filter(|r| r.method == method)
			.count()
	}
}

fn id_of(record: &Json) -> String {
	match &record["id"] {
		Json::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[async_trait]
impl Transport for FakeEndpoint {
	async fn send(&self, request: TransportRequest) -> Result<Json, TransportError> {
		let mut state = self.state.lock();
		state.requests.push(request.clone());
		if state.failing.contains(&request.method) {
			return Err(TransportError::Status {
				status: 500,
				body: "internal error".to_string(),
			});
		}

		let path = request
			.url
			.strip_prefix(BASE_URL)
			.unwrap_or(&request.url)
			.trim_start_matches('/')
			.to_string();
		let not_found = || TransportError::Status {
			status: 404,
			body: "not found".to_string(),
		};

		match (request.method, path.as_str()) {
			(Method::Get, "") => Ok(Json::Array(state.records.clone())),
			(Method::Post, "") => {
				let mut record = request.body.unwrap_or_default();
				record["id"] = json!(state.next_id);
				state.next_id += 1;
				state.records.push(record.clone());
				Ok(record)
			}
			(Method::Put, "rank") => {
				let order = request
					.body
					.and_then(|body| body["order"].as_array().cloned())
					.unwrap_or_default();
				let mut ranked = Vec::new();
				for id in order {
					if let Some(pos) = state.records.iter().position(|r| r["id"] == id) {
						ranked.push(state.records.remove(pos));
					}
				}
				ranked.append(&mut state.records);
				state.records = ranked;
				Ok(Json::Null)
			}
			(Method::Put, id) => {
				let body = request.body.unwrap_or_default();
				let slot = state
					.records
					.iter_mut()
					.find(|r| id_of(r) == id)
					.ok_or_else(not_found)?;
				*slot = body.clone();
				Ok(body)
			}
			(Method::Delete, id) => {
				let pos = state
					.records
					.iter()
					.position(|r| id_of(r) == id)
					.ok_or_else(not_found)?;
				state.records.remove(pos);
				Ok(Json::Null)
			}
			_ => Err(not_found()),
		}
	}
}
