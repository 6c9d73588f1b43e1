//! Static output-schema descriptors for structured completions.
//!
//! A schema is plain data: it renders a prompt-facing description of the expected object and
//! validates a raw JSON value before it is deserialized into the typed result.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A typed result that a structured completion can produce.
pub trait StructuredOutput
where
	Self: DeserializeOwned,
{
	const SCHEMA: &'static OutputSchema;
}

#[derive(Debug)]
pub struct OutputSchema {
	pub name: &'static str,
	pub description: &'static str,
	pub fields: &'static [Field],
}

#[derive(Debug)]
pub struct Field {
	pub name: &'static str,
	pub description: &'static str,
	pub kind: FieldKind,
	pub required: bool,
}

#[derive(Debug)]
pub enum FieldKind {
	Text { max_chars: Option<usize> },
	Integer,
	Number { min: Option<f64>, max: Option<f64> },
	OneOf(&'static [&'static str]),
	List(&'static OutputSchema),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{path} {message}")]
pub struct SchemaViolation {
	pub path: String,
	pub message: String,
}
impl SchemaViolation {
	fn new(path: &str, message: impl Into<String>) -> Self {
		let path = if path.is_empty() { "output".to_string() } else { path.to_string() };

		Self { path, message: message.into() }
	}
}

impl OutputSchema {
	/// Prompt-facing shape of the expected JSON object.
	pub fn describe(&self) -> Value {
		let mut out = Map::new();

		for field in self.fields {
			let value = match &field.kind {
				FieldKind::List(inner) => Value::Array(vec![inner.describe()]),
				kind => {
					let optional = if field.required { "" } else { ", optional" };

					Value::String(format!("{}{optional}: {}", kind_label(kind), field.description))
				},
			};

			out.insert(field.name.to_string(), value);
		}

		Value::Object(out)
	}

	pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
		validate_object(self, value, "")
	}
}

fn kind_label(kind: &FieldKind) -> String {
	match kind {
		FieldKind::Text { max_chars: Some(max) } => format!("string of at most {max} characters"),
		FieldKind::Text { max_chars: None } => "string".to_string(),
		FieldKind::Integer => "integer".to_string(),
		FieldKind::Number { min: Some(min), max: Some(max) } =>
			format!("number between {min} and {max} (inclusive)"),
		FieldKind::Number { min: Some(min), max: None } => format!("number of at least {min}"),
		FieldKind::Number { min: None, max: Some(max) } => format!("number of at most {max}"),
		FieldKind::Number { min: None, max: None } => "number".to_string(),
		FieldKind::OneOf(options) => format!("one of {}", options.join("|")),
		FieldKind::List(inner) => format!("list of {}", inner.name),
	}
}

fn validate_object(schema: &OutputSchema, value: &Value, path: &str) -> Result<(), SchemaViolation> {
	let Some(object) = value.as_object() else {
		return Err(SchemaViolation::new(path, format!("must be a {} object", schema.name)));
	};

	for field in schema.fields {
		let field_path =
			if path.is_empty() { field.name.to_string() } else { format!("{path}.{}", field.name) };

		match object.get(field.name) {
			None | Some(Value::Null) =>
				if field.required {
					return Err(SchemaViolation::new(&field_path, "is required"));
				},
			Some(field_value) => validate_field(&field.kind, field_value, &field_path)?,
		}
	}

	Ok(())
}

fn validate_field(kind: &FieldKind, value: &Value, path: &str) -> Result<(), SchemaViolation> {
	match kind {
		FieldKind::Text { max_chars } => {
			let Some(text) = value.as_str() else {
				return Err(SchemaViolation::new(path, "must be a string"));
			};

			if let Some(max) = max_chars
				&& text.chars().count() > *max
			{
				return Err(SchemaViolation::new(path, format!("must be at most {max} characters")));
			}
		},
		FieldKind::Integer =>
			if value.as_i64().is_none() {
				return Err(SchemaViolation::new(path, "must be an integer"));
			},
		FieldKind::Number { min, max } => {
			let Some(number) = value.as_f64().filter(|number| number.is_finite()) else {
				return Err(SchemaViolation::new(path, "must be a finite number"));
			};

			if min.map(|min| number < min).unwrap_or(false)
				|| max.map(|max| number > max).unwrap_or(false)
			{
				return Err(SchemaViolation::new(
					path,
					format!("must be a {}, got {number}", kind_label(kind)),
				));
			}
		},
		FieldKind::OneOf(options) => {
			let Some(text) = value.as_str() else {
				return Err(SchemaViolation::new(path, "must be a string"));
			};

			if !options.iter().any(|option| option.eq_ignore_ascii_case(text.trim())) {
				return Err(SchemaViolation::new(
					path,
					format!("must be one of {}, got {text:?}", options.join("|")),
				));
			}
		},
		FieldKind::List(inner) => {
			let Some(entries) = value.as_array() else {
				return Err(SchemaViolation::new(path, "must be a list"));
			};

			for (index, entry) in entries.iter().enumerate() {
				validate_object(inner, entry, &format!("{path}[{index}]"))?;
			}
		},
	}

	Ok(())
}
