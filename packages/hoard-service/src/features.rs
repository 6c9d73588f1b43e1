use hoard_domain::{GeneratedItem, ItemImage};
use hoard_providers::completion::ImageAttachment;

use crate::{Error, HoardService, Result};

const ITEM_PHOTO_CAPTION: &str = "Item photo.";

impl HoardService {
	/// Suggests a short name and description for a photographed item.
	pub async fn describe_item_image(&self, image: &ItemImage) -> Result<GeneratedItem> {
		if image.bytes.is_empty() {
			return Err(Error::InvalidRequest { message: "Item image is empty.".to_string() });
		}
		if image.bytes.len() as u64 > self.cfg.search.max_image_bytes {
			return Err(Error::InvalidRequest {
				message: format!(
					"Item image is {} bytes; the limit is {} bytes.",
					image.bytes.len(),
					self.cfg.search.max_image_bytes
				),
			});
		}

		let attachment = ImageAttachment {
			mime_type: image.mime_type.clone(),
			base64_data: image.to_base64(),
			caption: ITEM_PHOTO_CAPTION.to_string(),
		};
		let generated: GeneratedItem =
			self.query_structured(&self.cfg.calls.item_features, &[], vec![attachment]).await?;

		tracing::info!(name = %generated.name, "Item features generated.");

		Ok(generated)
	}
}
