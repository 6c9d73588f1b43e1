use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
	candidate::Candidate,
	schema::{Field, FieldKind, OutputSchema, StructuredOutput},
};

const CONFIDENCE_LABELS: &[&str] = &["High", "Medium", "Low"];
const ITEM_LOCATION_SCHEMA: OutputSchema = OutputSchema {
	name: "ItemLocation",
	description: "The single stored item that best answers the query and where it is kept.",
	fields: &[
		Field {
			name: "item_name",
			description: "Name of the item",
			kind: FieldKind::Text { max_chars: None },
			required: true,
		},
		Field {
			name: "container_name",
			description: "Name of the container holding the item",
			kind: FieldKind::Text { max_chars: None },
			required: true,
		},
		Field {
			name: "confidence",
			description: "How confident you are in this answer",
			kind: FieldKind::OneOf(CONFIDENCE_LABELS),
			required: true,
		},
		Field {
			name: "additional_info",
			description: "Helpful details about the item location, or the reasoning behind the confidence level",
			kind: FieldKind::Text { max_chars: None },
			required: true,
		},
	],
};

/// Qualitative confidence, the only form exposed in a final answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Confidence {
	High,
	Medium,
	Low,
}
impl Confidence {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::High => "High",
			Self::Medium => "Medium",
			Self::Low => "Low",
		}
	}
}
impl FromStr for Confidence {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let raw = raw.trim();

		[Self::High, Self::Medium, Self::Low]
			.into_iter()
			.find(|label| label.as_str().eq_ignore_ascii_case(raw))
			.ok_or_else(|| format!("Unknown confidence label {raw:?}."))
	}
}
impl TryFrom<String> for Confidence {
	type Error = String;

	fn try_from(raw: String) -> Result<Self, Self::Error> {
		raw.parse()
	}
}
impl fmt::Display for Confidence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemLocation {
	pub item_name: String,
	pub container_name: String,
	pub confidence: Confidence,
	pub additional_info: String,
}
impl ItemLocation {
	/// Answer taken directly from a confident first-pass candidate.
	pub fn from_confident_candidate(candidate: &Candidate) -> Self {
		Self {
			item_name: candidate.name.clone(),
			container_name: candidate.container_name.clone(),
			confidence: Confidence::High,
			additional_info: format!("Found with confidence score: {:?}", candidate.confidence),
		}
	}
}
impl StructuredOutput for ItemLocation {
	const SCHEMA: &'static OutputSchema = &ITEM_LOCATION_SCHEMA;
}
impl fmt::Display for ItemLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Item: {}", self.item_name)?;
		writeln!(f, "Container: {}", self.container_name)?;
		writeln!(f, "Confidence: {}", self.confidence)?;
		write!(f, "Additional Info: {}", self.additional_info)
	}
}
