use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl ErrorCode {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            400 | 422 => ErrorCode::Validation,
            409 => ErrorCode::Conflict,
            _ => ErrorCode::Internal,
        }
    }

    pub fn is_authorization(self) -> bool {
        matches!(self, ErrorCode::Unauthorized | ErrorCode::Forbidden)
    }
}

/// Error body returned by the back-office API on non-2xx responses.
///
/// The API is not consistent about the body; `message` is also accepted as
/// `error` or `erro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default = "default_code")]
    pub code: ErrorCode,
    #[serde(alias = "error", alias = "erro")]
    pub message: String,
}

fn default_code() -> ErrorCode {
    ErrorCode::Internal
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds an error from an HTTP status and raw body, keeping the server's
    /// message when the body parses and falling back to the trimmed text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let status_code = ErrorCode::from_http_status(status);
        match serde_json::from_str::<ApiError>(body) {
            Ok(mut parsed) => {
                if parsed.code == ErrorCode::Internal && status_code != ErrorCode::Internal {
                    parsed.code = status_code;
                }
                parsed
            }
            Err(_) => {
                let text = body.trim();
                let message = if text.is_empty() {
                    format!("HTTP {status}")
                } else {
                    text.to_string()
                };
                Self::new(status_code, message)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
