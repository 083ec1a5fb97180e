//! Declarative configuration.
//!
//! [`AdminSettings`] describes a widget in TOML or JSON. Everything that
//! is data (schema, choices, nested admins, initial records) can be
//! declared; behavior (overrides, prompts, transports, containers) is
//! added on the resulting [`AdminOptions`].
//!
//! ```toml
//! url = "/admin/products"
//! sortable = true
//!
//! [[schema]]
//! name = "title"
//! type = "text"
//! label = "Title"
//! required = true
//!
//! [[schema]]
//! name = "variants"
//! type = "admin"
//! label_column = "name"
//!
//! [[schema.options.schema]]
//! name = "name"
//! type = "text"
//! ```

use crate::options::AdminOptions;
use rest_admin_types::{AdminError, Choice, Collection, Column, NestedOptions, Record, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failure to load settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Unsupported settings format: {0}")]
	UnsupportedFormat(String),
}

impl From<SettingsError> for AdminError {
	fn from(e: SettingsError) -> Self {
		AdminError::Settings(e.to_string())
	}
}

/// Nested admin options of an `admin` column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedSettings {
	/// Columns of the embedded admin
	pub schema: Vec<ColumnSettings>,
	/// Identifier field of the sub-records
	#[serde(alias = "idColumn", skip_serializing_if = "Option::is_none")]
	pub id_column: Option<String>,
	/// Allow reordering sub-records
	pub sortable: bool,
	/// Deletion confirmation message
	#[serde(alias = "removeConfirm", skip_serializing_if = "Option::is_none")]
	pub remove_confirm: Option<String>,
}

/// One schema entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
	/// Field name
	pub name: String,
	/// Column type name
	#[serde(rename = "type")]
	pub column_type: String,
	/// Header and form label; the name when unset
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Reject falsy values
	pub required: bool,
	/// Reject values held by another record
	pub unique: bool,
	/// Starting value in new records
	#[serde(alias = "default", skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,
	/// Select choices
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub choices: Vec<Choice>,
	/// Choice value field
	#[serde(alias = "choiceValue", skip_serializing_if = "Option::is_none")]
	pub choice_value: Option<String>,
	/// Choice label field
	#[serde(alias = "choiceLabel", skip_serializing_if = "Option::is_none")]
	pub choice_label: Option<String>,
	/// Sub-record field listed by an `admin` column
	#[serde(alias = "labelColumn", skip_serializing_if = "Option::is_none")]
	pub label_column: Option<String>,
	/// Nested admin options
	#[serde(skip_serializing_if = "Option::is_none")]
	pub options: Option<NestedSettings>,
}

impl ColumnSettings {
	/// Builds the schema entry.
	pub fn to_column(&self) -> Column {
		let mut column = Column::new(self.name.clone(), self.column_type.clone())
			.required(self.required)
			.unique(self.unique)
			.choices(self.choices.clone());
		if let Some(label) = &self.label {
			column = column.label(label.clone());
		}
		if let Some(value) = &self.default_value {
			column = column.default_value(value.clone());
		}
		if let Some(field) = &self.choice_value {
			column = column.choice_value(field.clone());
		}
		if let Some(field) = &self.choice_label {
			column = column.choice_label(field.clone());
		}
		if let Some(field) = &self.label_column {
			column = column.label_column(field.clone());
		}
		if let Some(options) = &self.options {
			column = column.nested(options.to_nested());
		}
		column
	}
}

impl NestedSettings {
	fn to_nested(&self) -> NestedOptions {
		let mut nested = NestedOptions::new(to_schema(&self.schema)).sortable(self.sortable);
		if let Some(id_column) = &self.id_column {
			nested = nested.id_column(id_column.clone());
		}
		if let Some(message) = &self.remove_confirm {
			nested = nested.remove_confirm(message.clone());
		}
		nested
	}
}

fn to_schema(columns: &[ColumnSettings]) -> Vec<Column> {
	columns.iter().map(ColumnSettings::to_column).collect()
}

/// Declarative widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Identifier field
	#[serde(alias = "idColumn", skip_serializing_if = "Option::is_none")]
	pub id_column: Option<String>,
	/// Work on `data` in place
	pub local: bool,
	/// Collection endpoint
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Allow reordering
	pub sortable: bool,
	/// Deletion confirmation message
	#[serde(alias = "removeConfirm", skip_serializing_if = "Option::is_none")]
	pub remove_confirm: Option<String>,
	/// Columns in display order
	pub schema: Vec<ColumnSettings>,
	/// Initial records
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Vec<Record>>,
}

impl AdminSettings {
	/// Parses TOML settings.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Parses JSON settings.
	pub fn from_json_str(source: &str) -> Result<Self, SettingsError> {
		Ok(serde_json::from_str(source)?)
	}

	/// Loads settings from a `.toml` or `.json` file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let ext = path
			.extension()
			.and_then(|e| e.to_str())
			.ok_or_else(|| SettingsError::UnsupportedFormat("No file extension".to_string()))?;
		let contents = std::fs::read_to_string(path)?;
		let settings = match ext {
			"toml" => Self::from_toml_str(&contents)?,
			"json" => Self::from_json_str(&contents)?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(format!(
					"Unsupported file extension: {}",
					ext
				)));
			}
		};
		tracing::debug!(path = %path.display(), columns = settings.schema.len(), "Loaded admin settings");
		Ok(settings)
	}

	/// The schema entries.
	pub fn columns(&self) -> Vec<Column> {
		to_schema(&self.schema)
	}

	/// Converts into widget options.
	pub fn into_options(self) -> AdminOptions {
		let mut options = AdminOptions::new(self.columns())
			.with_local(self.local)
			.with_sortable(self.sortable);
		if let Some(id_column) = self.id_column {
			options = options.with_id_column(id_column);
		}
		if let Some(url) = self.url {
			options = options.with_url(url);
		}
		if let Some(message) = self.remove_confirm {
			options = options.with_remove_confirm(message);
		}
		if let Some(records) = self.data {
			options = options.with_data(Collection::from_records(records));
		}
		options
	}
}
