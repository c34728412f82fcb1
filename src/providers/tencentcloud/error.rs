use thiserror::Error;

/// Tencent Cloud API errors.
///
/// SECURITY: Error messages must NEVER contain the secret key or session token.
#[derive(Debug, Error)]
pub enum TencentCloudError {
    /// Credentials could not be turned into a signed request
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// API returned an error object inside the response envelope
    #[error("API error [{code}] {message} (request id: {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },

    /// Non-success HTTP status without a parsable envelope
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Request rejected locally, before anything is sent
    #[error("invalid {action} request: {message}")]
    InvalidRequest { action: String, message: String },

    #[error("failed to parse {action} response: {message}")]
    Parse { action: String, message: String },
}

impl From<TencentCloudError> for crate::providers::ServiceError {
    fn from(err: TencentCloudError) -> Self {
        crate::providers::ServiceError::TencentCloud(err.to_string())
    }
}
