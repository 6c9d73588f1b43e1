use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stands in for the image payload inside prompt text.
pub const IMAGE_MARKER: &str = "[Image provided below]";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemImage {
	pub mime_type: String,
	pub bytes: Vec<u8>,
}
impl ItemImage {
	pub fn to_base64(&self) -> String {
		BASE64.encode(&self.bytes)
	}
}

/// Read-only projection of an item owned by the surrounding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredItem {
	pub id: i64,
	pub name: String,
	pub description: String,
	pub container_name: String,
	pub image: Option<ItemImage>,
}

/// Prompt-facing view of a [`StoredItem`], with the image already base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
	pub id: i64,
	pub name: String,
	pub description: String,
	pub container_name: String,
	pub image: Option<String>,
}
impl SearchInput {
	pub fn from_item(item: &StoredItem) -> Self {
		Self {
			id: item.id,
			name: item.name.clone(),
			description: item.description.clone(),
			container_name: item.container_name.clone(),
			image: item.image.as_ref().map(ItemImage::to_base64),
		}
	}

	/// Renders the input as a JSON object string.
	///
	/// Fields listed in `exclude` are omitted. A present image is never embedded; it is replaced
	/// by [`IMAGE_MARKER`] and sent separately as multimodal content.
	pub fn to_prompt(&self, exclude: &[&str]) -> String {
		let image = match self.image {
			Some(_) => Value::String(IMAGE_MARKER.to_string()),
			None => Value::Null,
		};
		let mut fields = Map::new();

		for (key, value) in [
			("item_id", Value::from(self.id)),
			("name", Value::String(self.name.clone())),
			("description", Value::String(self.description.clone())),
			("container_name", Value::String(self.container_name.clone())),
			("image", image),
		] {
			if !exclude.contains(&key) {
				fields.insert(key.to_string(), value);
			}
		}

		Value::Object(fields).to_string()
	}
}
