use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response: connect refused, timeout, broken body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The request body could not be marshaled; raised before anything is sent.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server answered 2xx but the body is not the expected JSON.
    #[error("failed to decode {status} response: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport(error) => error.status(),
            Self::Encode(_) | Self::InvalidHeader(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status,
            message: error_message(status, body),
        }
    }
}

/// Gogs reports failures as `{"message": "..."}`; fall back to the raw text,
/// then to the canonical reason phrase.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(serde_json::Value::as_str)
        && !message.trim().is_empty()
    {
        return message.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .map(ToString::to_string)
        .unwrap_or_else(|| "request failed".to_string())
}
