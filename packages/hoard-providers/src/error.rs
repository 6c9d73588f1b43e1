pub type Result<T, E = Error> = std::result::Result<T, E>;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Whether a failed call may succeed if attempted again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	Retryable,
	Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error("Provider responded with HTTP {status}: {body}")]
	Status { status: u16, body: String },
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
	/// The model replied, but its content is not a JSON object.
	#[error("{message}")]
	InvalidOutput { message: String },
}
impl Error {
	pub(crate) fn status(status: u16, body: &str) -> Self {
		let body = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();

		Self::Status { status, body }
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Reqwest(err) =>
				if err.is_builder() {
					ErrorKind::Fatal
				} else if let Some(status) = err.status() {
					status_kind(status.as_u16())
				} else {
					ErrorKind::Retryable
				},
			Self::Status { status, .. } => status_kind(*status),
			Self::InvalidHeaderName(_) | Self::InvalidHeaderValue(_) | Self::InvalidConfig { .. } =>
				ErrorKind::Fatal,
			Self::InvalidResponse { .. } | Self::InvalidOutput { .. } => ErrorKind::Retryable,
		}
	}

	pub fn is_invalid_output(&self) -> bool {
		matches!(self, Self::InvalidOutput { .. })
	}
}

fn status_kind(status: u16) -> ErrorKind {
	match status {
		408 | 429 | 500..=599 => ErrorKind::Retryable,
		_ => ErrorKind::Fatal,
	}
}
