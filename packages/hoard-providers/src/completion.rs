use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// An image sent next to the prompt text, introduced by its caption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAttachment {
	pub mime_type: String,
	pub base64_data: String,
	pub caption: String,
}
impl ImageAttachment {
	pub fn data_url(&self) -> String {
		format!("data:{};base64,{}", self.mime_type, self.base64_data)
	}
}

#[derive(Clone, Debug)]
pub struct CompletionRequest {
	pub model: String,
	pub temperature: f32,
	pub system: String,
	pub user: Option<String>,
	pub attachments: Vec<ImageAttachment>,
}

/// Runs one chat completion and returns the model's reply parsed as JSON.
///
/// There is no retry here; callers own the retry policy.
pub async fn complete(
	cfg: &hoard_config::LlmProviderConfig,
	request: &CompletionRequest,
) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = build_request_body(request);
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let text = res.text().await.unwrap_or_default();

		return Err(Error::status(status.as_u16(), &text));
	}

	let json: Value = res.json().await?;

	parse_completion_json(json)
}

pub fn build_request_body(request: &CompletionRequest) -> Value {
	let mut messages = vec![serde_json::json!({ "role": "system", "content": request.system })];

	if request.attachments.is_empty() {
		if let Some(user) = request.user.as_deref() {
			messages.push(serde_json::json!({ "role": "user", "content": user }));
		}
	} else {
		let mut parts = Vec::with_capacity(request.attachments.len() * 2 + 1);

		if let Some(user) = request.user.as_deref() {
			parts.push(serde_json::json!({ "type": "text", "text": user }));
		}

		for attachment in &request.attachments {
			parts.push(serde_json::json!({ "type": "text", "text": attachment.caption }));
			parts.push(serde_json::json!({
				"type": "image_url",
				"image_url": { "url": attachment.data_url() },
			}));
		}

		messages.push(serde_json::json!({ "role": "user", "content": parts }));
	}

	serde_json::json!({
		"model": request.model,
		"temperature": request.temperature,
		"messages": messages,
	})
}

fn parse_completion_json(json: Value) -> Result<Value> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"));

	if let Some(content) = content {
		let text = content_text(content).ok_or_else(|| Error::InvalidResponse {
			message: "Completion content is neither text nor text parts.".to_string(),
		})?;
		let parsed: Value = serde_json::from_str(strip_code_fence(&text)).map_err(|err| {
			Error::InvalidOutput { message: format!("Completion content is not valid JSON: {err}.") }
		})?;

		if !parsed.is_object() {
			return Err(Error::InvalidOutput {
				message: "Completion content is not a JSON object.".to_string(),
			});
		}

		return Ok(parsed);
	}

	if json.get("choices").is_none() && json.is_object() {
		return Ok(json);
	}

	Err(Error::InvalidResponse {
		message: "Completion response is missing message content.".to_string(),
	})
}

fn content_text(content: &Value) -> Option<String> {
	if let Some(text) = content.as_str() {
		return Some(text.to_string());
	}

	let parts = content.as_array()?;
	let texts: Vec<&str> = parts
		.iter()
		.filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
		.filter_map(|part| part.get("text").and_then(Value::as_str))
		.collect();

	if texts.is_empty() { None } else { Some(texts.concat()) }
}

fn strip_code_fence(text: &str) -> &str {
	let trimmed = text.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let Some(body) = rest.strip_suffix("```") else {
		return trimmed;
	};
	// Drop an info string such as `json`, with or without a newline after it.
	body.trim_start().trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request(attachments: Vec<ImageAttachment>) -> CompletionRequest {
		CompletionRequest {
			model: "m".to_string(),
			temperature: 0.0,
			system: "sys".to_string(),
			user: Some("where is the drill".to_string()),
			attachments,
		}
	}

	#[test]
	fn parses_choice_content_json() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "{\"candidates\": []}" } }
			]
		});
		let parsed = parse_completion_json(json).expect("parse failed");

		assert!(parsed.get("candidates").is_some());
	}

	#[test]
	fn parses_fenced_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "```json\n{\"name\": \"Lamp\"}\n```" } }
			]
		});
		let parsed = parse_completion_json(json).expect("parse failed");

		assert_eq!(parsed["name"], "Lamp");
	}

	#[test]
	fn parses_single_line_fenced_content() {
		for content in ["```json{\"name\": \"Lamp\"}```", "```{\"name\": \"Lamp\"}```"] {
			let json = serde_json::json!({ "choices": [ { "message": { "content": content } } ] });
			let parsed = parse_completion_json(json).expect("parse failed");

			assert_eq!(parsed["name"], "Lamp");
		}
	}

	#[test]
	fn joins_text_parts() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": [
					{ "type": "text", "text": "{\"name\": " },
					{ "type": "text", "text": "\"Lamp\"}" }
				] } }
			]
		});
		let parsed = parse_completion_json(json).expect("parse failed");

		assert_eq!(parsed["name"], "Lamp");
	}

	#[test]
	fn prose_content_is_invalid_output() {
		let json = serde_json::json!({
			"choices": [ { "message": { "content": "The drill is in the garage." } } ]
		});
		let err = parse_completion_json(json).expect_err("prose is not JSON");

		assert!(err.is_invalid_output());
	}

	#[test]
	fn accepts_bare_object_response() {
		let json = serde_json::json!({ "item_name": "Drill" });
		let parsed = parse_completion_json(json).expect("parse failed");

		assert_eq!(parsed["item_name"], "Drill");
	}

	#[test]
	fn empty_choices_is_invalid_response() {
		let json = serde_json::json!({ "choices": [] });
		let err = parse_completion_json(json).expect_err("no content");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn text_only_request_uses_plain_content() {
		let body = build_request_body(&request(Vec::new()));

		assert_eq!(body["messages"][0]["role"], "system");
		assert_eq!(body["messages"][1]["content"], "where is the drill");
	}

	#[test]
	fn attachments_follow_their_captions() {
		let attachment = ImageAttachment {
			mime_type: "image/png".to_string(),
			base64_data: "AAAA".to_string(),
			caption: "Image of item \"Drill\" stored in \"Garage\".".to_string(),
		};
		let body = build_request_body(&request(vec![attachment]));
		let parts = body["messages"][1]["content"].as_array().expect("content parts");

		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0]["text"], "where is the drill");
		assert_eq!(parts[1]["text"], "Image of item \"Drill\" stored in \"Garage\".");
		assert_eq!(parts[2]["image_url"]["url"], "data:image/png;base64,AAAA");
	}
}
