pub mod features;
pub mod locate;
pub mod prompt;
pub mod retry;
pub mod search;
pub mod structured;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use error::{Error, NOT_FOUND_MESSAGE, Result, SEARCH_FAILED_MESSAGE};
use hoard_config::{Config, LlmProviderConfig};
use hoard_domain::StoredItem;
use hoard_providers::completion::{self, CompletionRequest};
use hoard_storage::Catalog;
pub use search::LocateRequest;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One chat completion round trip that yields the model's reply as a JSON object.
pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		request: &'a CompletionRequest,
	) -> BoxFuture<'a, hoard_providers::Result<Value>>;
}

/// Source of the items a user may search.
pub trait ItemRepository
where
	Self: Send + Sync,
{
	fn list_items<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<StoredItem>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub completion: Arc<dyn CompletionProvider>,
}
impl Providers {
	pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
		Self { completion }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { completion: Arc::new(DefaultProviders) }
	}
}

pub struct HoardService {
	pub cfg: Config,
	pub items: Arc<dyn ItemRepository>,
	pub providers: Providers,
}
impl HoardService {
	pub fn new(cfg: Config, items: Arc<dyn ItemRepository>) -> Self {
		Self { cfg, items, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, items: Arc<dyn ItemRepository>, providers: Providers) -> Self {
		Self { cfg, items, providers }
	}
}

struct DefaultProviders;
impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		request: &'a CompletionRequest,
	) -> BoxFuture<'a, hoard_providers::Result<Value>> {
		Box::pin(completion::complete(cfg, request))
	}
}

impl ItemRepository for Catalog {
	fn list_items<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<StoredItem>>> {
		let items = self.items_for_user(user_id);

		Box::pin(async move { Ok(items) })
	}
}
