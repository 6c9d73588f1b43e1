use crate::{Error, Result};

/// Fills `{name}` placeholders from `vars`. `{{` and `}}` render literal braces.
///
/// Substituted values are inserted as-is and never rescanned, so context JSON may contain braces.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> Result<String> {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(index) = rest.find(['{', '}']) {
		out.push_str(&rest[..index]);

		let tail = &rest[index..];

		if let Some(after) = tail.strip_prefix("{{") {
			out.push('{');

			rest = after;
		} else if let Some(after) = tail.strip_prefix("}}") {
			out.push('}');

			rest = after;
		} else if let Some(after) = tail.strip_prefix('{') {
			let Some(end) = after.find('}') else {
				return Err(Error::InvalidRequest {
					message: format!("Unclosed placeholder in template near {:?}.", preview(tail)),
				});
			};
			let name = after[..end].trim();
			let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) else {
				return Err(Error::InvalidRequest {
					message: format!("Template references unknown variable {name:?}."),
				});
			};

			out.push_str(value);

			rest = &after[end + 1..];
		} else {
			return Err(Error::InvalidRequest {
				message: format!("Unmatched closing brace in template near {:?}.", preview(tail)),
			});
		}
	}

	out.push_str(rest);

	Ok(out)
}

fn preview(text: &str) -> String {
	text.chars().take(24).collect()
}
