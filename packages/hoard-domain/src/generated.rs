use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldKind, OutputSchema, StructuredOutput};

pub const MAX_GENERATED_NAME_CHARS: usize = 30;
pub const MAX_GENERATED_DESCRIPTION_CHARS: usize = 200;

const GENERATED_ITEM_SCHEMA: OutputSchema = OutputSchema {
	name: "GeneratedItem",
	description: "Item attributes inferred from a photo.",
	fields: &[
		Field {
			name: "name",
			description: "Short name of the item in the photo",
			kind: FieldKind::Text { max_chars: Some(MAX_GENERATED_NAME_CHARS) },
			required: true,
		},
		Field {
			name: "description",
			description: "Description that helps recognise the item later",
			kind: FieldKind::Text { max_chars: Some(MAX_GENERATED_DESCRIPTION_CHARS) },
			required: true,
		},
	],
};

/// Name and description suggested for a new item from its photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItem {
	pub name: String,
	pub description: String,
}
impl StructuredOutput for GeneratedItem {
	const SCHEMA: &'static OutputSchema = &GENERATED_ITEM_SCHEMA;
}
