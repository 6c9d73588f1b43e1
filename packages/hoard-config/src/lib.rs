mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Catalog, Config, LlmCall, LlmCalls, LlmProviderConfig, Providers, Retry, Search, Service,
};

use std::{
	fs,
	path::{Path, PathBuf},
};

const MAX_TEMPERATURE: f32 = 2.0;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg, path.parent());

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let llm = &cfg.providers.llm;

	for (label, value) in [
		("providers.llm.provider_id", &llm.provider_id),
		("providers.llm.api_base", &llm.api_base),
		("providers.llm.api_key", &llm.api_key),
		("providers.llm.model", &llm.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::validation(format!("{label} must be non-empty.")));
		}
	}

	validate_temperature("providers.llm.temperature", llm.temperature)?;

	if llm.timeout_ms == 0 {
		return Err(Error::validation("providers.llm.timeout_ms must be greater than zero."));
	}

	for (key, value) in &llm.default_headers {
		if !value.is_string() {
			return Err(Error::validation(format!(
				"providers.llm.default_headers.{key} must be a string."
			)));
		}
	}

	if cfg.retry.max_attempts == 0 {
		return Err(Error::validation("retry.max_attempts must be greater than zero."));
	}
	if cfg.retry.base_delay_ms > cfg.retry.max_delay_ms {
		return Err(Error::validation(
			"retry.base_delay_ms must be less than or equal to retry.max_delay_ms.",
		));
	}
	if cfg.search.candidate_k == 0 {
		return Err(Error::validation("search.candidate_k must be greater than zero."));
	}
	if cfg.search.max_image_bytes == 0 {
		return Err(Error::validation("search.max_image_bytes must be greater than zero."));
	}
	if cfg.catalog.path.as_os_str().is_empty() {
		return Err(Error::validation("catalog.path must be non-empty."));
	}

	for (label, call) in [
		("calls.candidates", &cfg.calls.candidates),
		("calls.location", &cfg.calls.location),
		("calls.item_features", &cfg.calls.item_features),
	] {
		if call.system_prompt.trim().is_empty() {
			return Err(Error::validation(format!("{label}.system_prompt must be non-empty.")));
		}

		if let Some(temperature) = call.temperature {
			validate_temperature(&format!("{label}.temperature"), temperature)?;
		}
	}

	Ok(())
}

fn validate_temperature(label: &str, value: f32) -> Result<()> {
	if !value.is_finite() {
		return Err(Error::validation(format!("{label} must be a finite number.")));
	}
	if !(0.0..=MAX_TEMPERATURE).contains(&value) {
		return Err(Error::validation(format!("{label} must be in the range 0.0-2.0.")));
	}

	Ok(())
}

fn normalize(cfg: &mut Config, config_dir: Option<&Path>) {
	for call in [&mut cfg.calls.candidates, &mut cfg.calls.location, &mut cfg.calls.item_features]
	{
		if call.model.as_deref().map(|model| model.trim().is_empty()).unwrap_or(false) {
			call.model = None;
		}
		if call.human_prompt.as_deref().map(|prompt| prompt.trim().is_empty()).unwrap_or(false) {
			call.human_prompt = None;
		}
	}

	if let Some(dir) = config_dir
		&& cfg.catalog.path.is_relative()
		&& !cfg.catalog.path.as_os_str().is_empty()
	{
		cfg.catalog.path = resolve_relative(dir, &cfg.catalog.path);
	}
}

fn resolve_relative(dir: &Path, path: &Path) -> PathBuf {
	if dir.as_os_str().is_empty() { path.to_path_buf() } else { dir.join(path) }
}
