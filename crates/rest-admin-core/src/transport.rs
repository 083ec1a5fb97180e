//! Transport to a collection endpoint.
//!
//! [`RemoteDataSource`](crate::source::RemoteDataSource) builds
//! [`TransportRequest`]s and hands them to a [`Transport`]. The default
//! [`HttpTransport`] sends them with `reqwest`; tests and embedders can
//! provide their own implementation.

use async_trait::async_trait;
use rest_admin_types::TransportError;
use std::fmt;
use std::time::Duration;

/// HTTP method of a collection endpoint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	/// Fetch the collection
	Get,
	/// Create a record
	Post,
	/// Update a record or the rank order
	Put,
	/// Delete a record
	Delete,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		})
	}
}

/// One call to a collection endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
	/// HTTP method
	pub method: Method,
	/// Absolute or base-relative URL
	pub url: String,
	/// JSON body, if any
	pub body: Option<serde_json::Value>,
}

impl TransportRequest {
	/// Creates a request without a body.
	pub fn new(method: Method, url: impl Into<String>) -> Self {
		Self {
			method,
			url: url.into(),
			body: None,
		}
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);
		self
	}
}

/// Sends requests to a collection endpoint.
///
/// Implementations return the decoded JSON response, `Null` for an empty
/// body, and map every failure to a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends one request.
	async fn send(&self, request: TransportRequest) -> Result<serde_json::Value, TransportError>;
}

/// Settings of [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
	/// Request timeout
	pub timeout: Duration,
	/// Extra headers sent with every request
	pub headers: Vec<(String, String)>,
}

impl Default for HttpTransportConfig {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
			headers: Vec::new(),
		}
	}
}

impl HttpTransportConfig {
	/// Sets the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Adds a header sent with every request.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}
}

/// Decodes a response body, treating an empty body as `Null`.
pub fn decode_body(body: &str) -> Result<serde_json::Value, TransportError> {
	if body.trim().is_empty() {
		return Ok(serde_json::Value::Null);
	}
	serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
	use super::{HttpTransportConfig, Method, Transport, TransportRequest, decode_body};
	use async_trait::async_trait;
	use reqwest::Client;
	use rest_admin_types::TransportError;

	/// [`Transport`] over HTTP with JSON bodies.
	#[derive(Debug, Clone)]
	pub struct HttpTransport {
		client: Client,
		config: HttpTransportConfig,
	}

	impl HttpTransport {
		/// Creates a transport with the default 30 second timeout.
		pub fn new() -> Result<Self, TransportError> {
			Self::with_config(HttpTransportConfig::default())
		}

		/// Creates a transport with custom settings.
		pub fn with_config(config: HttpTransportConfig) -> Result<Self, TransportError> {
			let client = Client::builder()
				.timeout(config.timeout)
				.build()
				.map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;
			Ok(Self { client, config })
		}

		/// Creates a transport around an existing client.
		pub fn with_client(client: Client) -> Self {
			Self {
				client,
				config: HttpTransportConfig::default(),
			}
		}
	}

	#[async_trait]
	impl Transport for HttpTransport {
		async fn send(&self, request: TransportRequest) -> Result<serde_json::Value, TransportError> {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self
				.client
				.request(method, &request.url)
				.header("Accept", "application/json");
			for (name, value) in &self.config.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await.map_err(|e| {
				TransportError::Request(format!("{} {} failed: {}", request.method, request.url, e))
			})?;

			let status = response.status();
			let body = response
				.text()
				.await
				.map_err(|e| TransportError::Request(format!("Failed to read response: {}", e)))?;

			if !status.is_success() {
				return Err(TransportError::Status {
					status: status.as_u16(),
					body,
				});
			}

			decode_body(&body)
		}
	}
}
