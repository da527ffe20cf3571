use thiserror::Error;

/// Failure talking to the inference backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors surfaced to the user by the conversation controller.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Only PDF files are accepted (got '{0}')")]
    UnsupportedFile(String),

    #[error("Upload failed: {0}")]
    Upload(#[source] ApiError),

    #[error("Question failed: {0}")]
    Ask(#[source] ApiError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CV_AGENT_API_BASE_URL is not a valid http(s) URL: '{0}'")]
    InvalidBaseUrl(String),

    #[error("CV_AGENT_MODE must be 'development' or 'production', got '{0}'")]
    InvalidMode(String),
}
