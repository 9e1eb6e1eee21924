use serde_json::Value;

/// Every way a backend call can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status code.
    #[error("{}", status_message(*status, detail.as_deref()))]
    Status { status: u16, detail: Option<String> },
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Failed to connect to backend: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body did not match the expected shape.
    #[error("Unexpected response from backend: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Builds a status error, pulling `detail` out of a JSON error body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("detail").cloned())
            .and_then(|detail| match detail {
                Value::Null => None,
                Value::String(text) if text.trim().is_empty() => None,
                Value::String(text) => Some(text),
                other => Some(other.to_string()),
            });
        ApiError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|code| code.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

fn status_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_string(),
        None => format!("HTTP error! status: {}", status),
    }
}
