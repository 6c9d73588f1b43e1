use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub catalog: Catalog,
	pub providers: Providers,
	#[serde(default)]
	pub retry: Retry,
	#[serde(default)]
	pub search: Search,
	pub calls: LlmCalls,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
	/// Relative paths resolve against the directory of the config file.
	pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Retry policy applied by the structured completion client to every call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retry {
	pub max_attempts: u32,
	pub base_delay_ms: u64,
	pub max_delay_ms: u64,
	pub jitter: bool,
	/// Also retry when the model output does not match the requested schema.
	pub retry_invalid_output: bool,
}
impl Default for Retry {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay_ms: 500,
			max_delay_ms: 8_000,
			jitter: true,
			retry_invalid_output: true,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub candidate_k: u32,
	pub attach_images: bool,
	pub max_attachments: u32,
	pub max_image_bytes: u64,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			candidate_k: 10,
			attach_images: true,
			max_attachments: 8,
			max_image_bytes: 5 * 1_024 * 1_024,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct LlmCalls {
	pub candidates: LlmCall,
	pub location: LlmCall,
	pub item_features: LlmCall,
}

/// One prompt pair plus optional model overrides.
///
/// Templates use `{name}` placeholders; `{{` and `}}` render literal braces.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmCall {
	pub system_prompt: String,
	pub human_prompt: Option<String>,
	pub model: Option<String>,
	pub temperature: Option<f32>,
}

fn default_log_level() -> String {
	"info".to_string()
}
