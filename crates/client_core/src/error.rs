use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {}", error.message)]
    Status { status: u16, error: ApiError },
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Status { error, .. } => error.code,
            _ => ErrorCode::Internal,
        }
    }

    pub fn is_authorization(&self) -> bool {
        self.code().is_authorization()
    }
}

#[derive(Debug, Error)]
pub enum TenantError {
    #[error("session is not authenticated")]
    Unauthenticated,
    #[error("tenant lookup returned an empty tenant id")]
    MissingTenant,
    #[error("tenant lookup failed: {0}")]
    Gateway(#[source] GatewayError),
}

impl From<GatewayError> for TenantError {
    fn from(value: GatewayError) -> Self {
        if value.is_authorization() {
            TenantError::Unauthenticated
        } else {
            TenantError::Gateway(value)
        }
    }
}
