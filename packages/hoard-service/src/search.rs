use serde::{Deserialize, Serialize};
use tracing::Instrument as _;
use uuid::Uuid;

use hoard_domain::{CandidateSet, ItemLocation, StoredItem, context};

use crate::{Error, HoardService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocateRequest {
	pub user_id: i64,
	pub query: String,
	/// Candidate cap; `search.candidate_k` when absent.
	#[serde(default)]
	pub k: Option<u32>,
}

impl HoardService {
	/// Full search: load the user's items, shortlist candidates, then pick one location.
	pub async fn find_item_location(&self, req: LocateRequest) -> Result<ItemLocation> {
		let search_id = Uuid::new_v4();
		let k = req.k.unwrap_or(self.cfg.search.candidate_k);
		let span = tracing::info_span!("find_item_location", %search_id, user_id = req.user_id, k);

		async move {
			validate_query(&req.query, k)?;

			let pool = self.items.list_items(req.user_id).await?;

			tracing::info!(pool_size = pool.len(), "Item pool loaded.");

			let candidates = self.search_candidates(&req.query, &pool, k).await?;
			let location = self.disambiguate(&candidates, &req.query, &pool).await?;

			tracing::info!(
				item = %location.item_name,
				container = %location.container_name,
				confidence = %location.confidence,
				"Item located."
			);

			Ok::<_, Error>(location)
		}
		.instrument(span)
		.await
	}

	/// Asks the model for up to `k` stored items that plausibly match `query`.
	///
	/// The returned set is exactly what the model produced; an empty pool still yields a call.
	pub async fn search_candidates(
		&self,
		query: &str,
		pool: &[StoredItem],
		k: u32,
	) -> Result<CandidateSet> {
		validate_query(query, k)?;

		let formatted_context = context::format_context(pool);
		let k_text = k.to_string();
		let candidates: CandidateSet = self
			.query_structured(
				&self.cfg.calls.candidates,
				&[("user_query", query), ("formatted_context", &formatted_context), ("k", &k_text)],
				Vec::new(),
			)
			.await?;

		tracing::info!(
			pool_size = pool.len(),
			candidates = candidates.len(),
			"Candidate search finished."
		);

		Ok(candidates)
	}
}

fn validate_query(query: &str, k: u32) -> Result<()> {
	if query.trim().is_empty() {
		return Err(Error::InvalidRequest { message: "Search query must be non-empty.".to_string() });
	}
	if k == 0 {
		return Err(Error::InvalidRequest {
			message: "Candidate count must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
