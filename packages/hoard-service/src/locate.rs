use hoard_domain::{CandidateSet, ItemLocation, SearchInput, StoredItem, context, decision};
use hoard_providers::completion::ImageAttachment;

use crate::{Error, HoardService, Result};

impl HoardService {
	/// Turns a candidate set into one location.
	///
	/// A single candidate at or above the confidence threshold is answered without a model call.
	/// Otherwise the stored items named by the candidates are sent, with their photos, to the
	/// location prompt.
	pub async fn disambiguate(
		&self,
		candidates: &CandidateSet,
		query: &str,
		pool: &[StoredItem],
	) -> Result<ItemLocation> {
		if let Some(candidate) = decision::high_confidence_candidate(candidates) {
			tracing::info!(
				item = %candidate.name,
				confidence = candidate.confidence,
				"Single confident candidate. Skipping disambiguation."
			);

			return Ok(ItemLocation::from_confident_candidate(candidate));
		}
		if candidates.is_empty() {
			return Err(Error::NotFound { message: "No stored item matches the query.".to_string() });
		}

		let narrowed = candidates.matching_items(pool);

		if narrowed.is_empty() {
			tracing::warn!(
				candidates = candidates.len(),
				"Candidates do not match any stored item. Skipping disambiguation."
			);

			return Err(Error::NotFound {
				message: "None of the candidates is a stored item.".to_string(),
			});
		}

		let inputs: Vec<SearchInput> = narrowed.iter().copied().map(SearchInput::from_item).collect();
		let formatted_context = context::format_search_inputs(&inputs);
		let attachments = self.image_attachments(&narrowed, &inputs);

		tracing::info!(
			candidates = candidates.len(),
			items = narrowed.len(),
			images = attachments.len(),
			"Disambiguating candidates."
		);

		self.query_structured(
			&self.cfg.calls.location,
			&[("query", query), ("formatted_context", &formatted_context)],
			attachments,
		)
		.await
	}

	fn image_attachments(&self, items: &[&StoredItem], inputs: &[SearchInput]) -> Vec<ImageAttachment> {
		let search = &self.cfg.search;

		if !search.attach_images {
			return Vec::new();
		}

		let mut attachments = Vec::new();

		for (item, input) in items.iter().zip(inputs) {
			let (Some(image), Some(data)) = (item.image.as_ref(), input.image.as_ref()) else {
				continue;
			};

			if attachments.len() >= search.max_attachments as usize {
				tracing::warn!(
					max_attachments = search.max_attachments,
					"Attachment limit reached. Remaining images are skipped."
				);

				break;
			}
			if image.bytes.len() as u64 > search.max_image_bytes {
				tracing::warn!(
					item_id = item.id,
					bytes = image.bytes.len(),
					max_image_bytes = search.max_image_bytes,
					"Item image is too large to attach."
				);

				continue;
			}

			attachments.push(ImageAttachment {
				mime_type: image.mime_type.clone(),
				base64_data: data.clone(),
				caption: format!(
					"Image of item \"{}\" stored in \"{}\".",
					item.name, item.container_name
				),
			});
		}

		attachments
	}
}
