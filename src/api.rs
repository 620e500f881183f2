//! Async client for the **on-page SEO analysis API**.
//!
//! The service takes a single `POST` with `{ url, keyword, country }` and answers with an
//! `AnalysisResponse` JSON document. This module only moves bytes and interprets the reply;
//! deadlines and the busy guard live in [`crate::lifecycle`].
//!
//! ### Notes
//! - The client never retries. A failed submission is reported and the user submits again.
//! - The body is parsed *before* the HTTP status is inspected, so an error page that is not
//!   JSON surfaces as [`AnalysisError::MalformedResponse`] even on a 5xx.
//! - `detail` (HTTP errors) and `error_message` (`status != "success"`) are passed through
//!   to the user message when present.

use crate::error::{AnalysisError, TransportError};
use crate::models::{AnalysisRequest, AnalysisResponse};
use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Status line and raw body of an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one analysis request. Implemented by [`Client`]; tests substitute scripted replies.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, TransportError>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(10)) // connect timeout; the total deadline is the lifecycle's
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("seo_advisor/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self { http }
    }
}

impl Client {
    /// Wrap an existing `reqwest` client (custom proxies, TLS roots, ...).
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for Client {
    async fn post_json(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, TransportError> {
        let resp = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;
        let status = resp.status().as_u16();
        debug!("POST {} -> HTTP {}", endpoint, status);
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Turn a raw reply into a usable response or the matching [`AnalysisError`].
///
/// Checks, in order: body is JSON, HTTP status is 2xx, `status == "success"`,
/// `target_analysis` is present.
pub fn interpret_response(raw: &RawResponse) -> Result<AnalysisResponse, AnalysisError> {
    let v: Value =
        serde_json::from_str(&raw.body).map_err(|_| AnalysisError::MalformedResponse)?;

    if !(200..300).contains(&raw.status) {
        return Err(match raw.status {
            422 => AnalysisError::InvalidInput,
            s if s >= 500 => AnalysisError::ServerError { status: s },
            s => AnalysisError::HttpError {
                status: s,
                message: v.get("detail").and_then(detail_text),
            },
        });
    }

    // A bare array or scalar has no status field at all.
    if !v.is_object() {
        return Err(AnalysisError::AnalysisFailed { message: None });
    }
    let parsed: AnalysisResponse =
        serde_json::from_value(v).map_err(|_| AnalysisError::MalformedResponse)?;

    if !parsed.is_success() {
        return Err(AnalysisError::AnalysisFailed {
            message: parsed.error_message.filter(|m| !m.is_empty()),
        });
    }
    if parsed.target_analysis.is_none() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(parsed)
}

/// `detail` is usually a string, but validation errors send a list of objects.
fn detail_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
