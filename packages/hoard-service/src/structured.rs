use serde_json::Value;

use hoard_config::LlmCall;
use hoard_domain::StructuredOutput;
use hoard_providers::{
	ErrorKind,
	completion::{CompletionRequest, ImageAttachment},
};

use crate::{Error, HoardService, Result, prompt, retry};

/// Outcome of a single failed attempt, tagged with whether another attempt may help.
#[derive(Debug)]
pub(crate) enum Attempt {
	Retryable(Error),
	Fatal(Error),
}

impl HoardService {
	/// Renders `call` with `vars`, asks the model for a `T`, and validates the reply.
	///
	/// Transient transport failures are retried under the configured policy. Replies that do not
	/// match the schema are retried only when `retry.retry_invalid_output` is set.
	pub async fn query_structured<T>(
		&self,
		call: &LlmCall,
		vars: &[(&str, &str)],
		attachments: Vec<ImageAttachment>,
	) -> Result<T>
	where
		T: StructuredOutput,
	{
		let request = self.build_request::<T>(call, vars, attachments)?;
		let policy = &self.cfg.retry;
		let mut attempt = 1;

		loop {
			match self.attempt_structured::<T>(&request).await {
				Ok(output) => return Ok(output),
				Err(Attempt::Retryable(err)) if attempt < policy.max_attempts => {
					let delay = retry::backoff_delay(policy, attempt);

					tracing::warn!(
						schema = T::SCHEMA.name,
						attempt,
						max_attempts = policy.max_attempts,
						delay_ms = delay.as_millis() as u64,
						error = %err,
						"Structured completion failed. Retrying."
					);

					tokio::time::sleep(delay).await;

					attempt += 1;
				},
				Err(Attempt::Retryable(err)) | Err(Attempt::Fatal(err)) => {
					tracing::error!(
						schema = T::SCHEMA.name,
						attempt,
						error = %err,
						"Structured completion failed."
					);

					return Err(err);
				},
			}
		}
	}

	fn build_request<T>(
		&self,
		call: &LlmCall,
		vars: &[(&str, &str)],
		attachments: Vec<ImageAttachment>,
	) -> Result<CompletionRequest>
	where
		T: StructuredOutput,
	{
		let llm = &self.cfg.providers.llm;
		let system = format!(
			"{}\n\n{}",
			prompt::render_template(&call.system_prompt, vars)?,
			schema_instructions::<T>()
		);
		let user =
			call.human_prompt.as_deref().map(|text| prompt::render_template(text, vars)).transpose()?;

		Ok(CompletionRequest {
			model: call.model.clone().unwrap_or_else(|| llm.model.clone()),
			temperature: call.temperature.unwrap_or(llm.temperature),
			system,
			user,
			attachments,
		})
	}

	async fn attempt_structured<T>(&self, request: &CompletionRequest) -> Result<T, Attempt>
	where
		T: StructuredOutput,
	{
		let raw = self
			.providers
			.completion
			.complete(&self.cfg.providers.llm, request)
			.await
			.map_err(|err| self.classify_provider_error(err))?;

		self.parse_output(raw)
	}

	fn parse_output<T>(&self, raw: Value) -> Result<T, Attempt>
	where
		T: StructuredOutput,
	{
		if let Err(violation) = T::SCHEMA.validate(&raw) {
			return Err(self.invalid_output(format!(
				"{} does not match its schema: {violation}.",
				T::SCHEMA.name
			)));
		}

		serde_json::from_value(raw).map_err(|err| {
			self.invalid_output(format!("{} could not be decoded: {err}.", T::SCHEMA.name))
		})
	}

	fn classify_provider_error(&self, err: hoard_providers::Error) -> Attempt {
		if err.is_invalid_output() {
			return self.invalid_output(err.to_string());
		}

		match err.kind() {
			ErrorKind::Retryable => Attempt::Retryable(err.into()),
			ErrorKind::Fatal => Attempt::Fatal(err.into()),
		}
	}

	fn invalid_output(&self, message: String) -> Attempt {
		let err = Error::Validation { message };

		if self.cfg.retry.retry_invalid_output { Attempt::Retryable(err) } else { Attempt::Fatal(err) }
	}
}

fn schema_instructions<T>() -> String
where
	T: StructuredOutput,
{
	let schema = T::SCHEMA;
	let shape = serde_json::to_string_pretty(&schema.describe()).unwrap_or_default();

	format!(
		"Respond with a single JSON object named {} ({}) and nothing else. \
Use exactly this shape:\n{shape}",
		schema.name, schema.description
	)
}
