use thiserror::Error;

/// Why a submission did not produce a result.
///
/// `Display` is the message shown to the user; each kind maps to exactly one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Please provide both URL and keyword")]
    MissingInput,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Unable to connect to the server. Please check if the service is available.")]
    NetworkUnreachable,
    #[error("Invalid response from server. Please try again.")]
    MalformedResponse,
    /// HTTP 422 from the service.
    #[error("Invalid input data. Please check your URL and keyword.")]
    InvalidInput,
    #[error("Server error. Please try again later.")]
    ServerError { status: u16 },
    #[error("Error: {}", http_error_text(*.status, .message))]
    HttpError { status: u16, message: Option<String> },
    #[error("Error: {}", .message.as_deref().unwrap_or("Analysis failed"))]
    AnalysisFailed { message: Option<String> },
    #[error("Error: No analysis data received")]
    EmptyResult,
}

impl AnalysisError {
    /// Stable identifier for logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MissingInput => "missing_input",
            AnalysisError::InvalidUrl => "invalid_url",
            AnalysisError::Timeout => "timeout",
            AnalysisError::NetworkUnreachable => "network_unreachable",
            AnalysisError::MalformedResponse => "malformed_response",
            AnalysisError::InvalidInput => "invalid_input",
            AnalysisError::ServerError { .. } => "server_error",
            AnalysisError::HttpError { .. } => "http_error",
            AnalysisError::AnalysisFailed { .. } => "analysis_failed",
            AnalysisError::EmptyResult => "empty_result",
        }
    }

    /// Failures detected before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::MissingInput | AnalysisError::InvalidUrl)
    }
}

/// Server detail first, then the status reason phrase, then the bare status code.
fn http_error_text(status: u16, message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => m.clone(),
        _ => reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status)),
    }
}

/// Low-level failure of the outbound call, before any response could be read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot reach analysis service: {0}")]
    Unreachable(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Unreachable(e.to_string())
        }
    }
}
