pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const SEARCH_FAILED_MESSAGE: &str = "Could not complete search, please try again.";
pub const NOT_FOUND_MESSAGE: &str = "No matching item was found.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Invalid model output: {message}")]
	Validation { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	/// Text safe to show an end user. Never carries raw model output or provider bodies.
	pub fn user_message(&self) -> &'static str {
		match self {
			Self::NotFound { .. } => NOT_FOUND_MESSAGE,
			_ => SEARCH_FAILED_MESSAGE,
		}
	}
}

impl From<hoard_providers::Error> for Error {
	fn from(err: hoard_providers::Error) -> Self {
		if err.is_invalid_output() {
			Self::Validation { message: err.to_string() }
		} else {
			Self::Provider { message: err.to_string() }
		}
	}
}

impl From<hoard_storage::Error> for Error {
	fn from(err: hoard_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
