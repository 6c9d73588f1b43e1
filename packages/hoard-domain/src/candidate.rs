use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
	item::StoredItem,
	schema::{Field, FieldKind, OutputSchema, StructuredOutput},
};

const CANDIDATE_SCHEMA: OutputSchema = OutputSchema {
	name: "ItemSearchCandidate",
	description: "A stored item that may match the search query.",
	fields: &[
		Field {
			name: "item_id",
			description: "The item_id of the matching stored item",
			kind: FieldKind::Integer,
			required: false,
		},
		Field {
			name: "name",
			description: "Item name",
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
			description: "Confidence that this is the item the user is looking for",
			kind: FieldKind::Number { min: Some(0.0), max: Some(1.0) },
			required: true,
		},
	],
};
const CANDIDATE_SET_SCHEMA: OutputSchema = OutputSchema {
	name: "ItemSearchCandidates",
	description: "Stored items that may match the search query, most likely first.",
	fields: &[Field {
		name: "candidates",
		description: "Candidate items",
		kind: FieldKind::List(&CANDIDATE_SCHEMA),
		required: false,
	}],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub item_id: Option<i64>,
	pub name: String,
	pub container_name: String,
	pub confidence: f64,
}

/// Candidates in model output order. Duplicates are kept as returned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
	#[serde(default)]
	pub candidates: Vec<Candidate>,
}
impl CandidateSet {
	pub fn new(candidates: Vec<Candidate>) -> Self {
		Self { candidates }
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	/// Selects the pool items these candidates refer to, in pool order.
	///
	/// A candidate whose `item_id` names a pool item selects that item only. Any other candidate
	/// selects every item with the same name. Candidates that match neither select nothing.
	pub fn matching_items<'a>(&self, pool: &'a [StoredItem]) -> Vec<&'a StoredItem> {
		let pool_ids: HashSet<i64> = pool.iter().map(|item| item.id).collect();
		let mut ids = HashSet::new();
		let mut names = HashSet::new();

		for candidate in &self.candidates {
			match candidate.item_id {
				Some(id) if pool_ids.contains(&id) => {
					ids.insert(id);
				},
				_ => {
					names.insert(candidate.name.as_str());
				},
			}
		}

		pool.iter()
			.filter(|item| ids.contains(&item.id) || names.contains(item.name.as_str()))
			.collect()
	}
}
impl StructuredOutput for CandidateSet {
	const SCHEMA: &'static OutputSchema = &CANDIDATE_SET_SCHEMA;
}
