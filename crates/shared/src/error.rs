use serde::{Deserialize, Serialize};

/// Body the backend attaches to non-2xx responses.
///
/// Only `error` is interpreted by the client; the remaining fields are kept
/// for logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meli_error: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meli_error_raw: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(serde_json::Value::String(message.into())),
            ..Self::default()
        }
    }

    /// The backend message, if it is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.error {
            Some(serde_json::Value::String(message)) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
