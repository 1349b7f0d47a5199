use crate::error::AppError;
use crate::payload::Payload;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt;

const ANALYZE_PATH: &str = "/api/tasks/analyze/";
const SUGGEST_PATH: &str = "/api/tasks/suggest/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Suggest,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Analyze => ANALYZE_PATH,
            Self::Suggest => SUGGEST_PATH,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyze => f.write_str("analyze"),
            Self::Suggest => f.write_str("suggest"),
        }
    }
}

/// A response body: parsed JSON when it parses, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            return Self::Text(text);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// The scoring service as seen by the controller.
pub trait ScoringApi {
    fn post_payload(&self, endpoint: Endpoint, payload: &Payload)
    -> Result<ResponseBody, AppError>;
}

pub struct HttpScoringClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpScoringClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        // No request timeout.
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|err| AppError::unexpected(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn unreachable_hint(&self) -> String {
        format!(
            "Could not reach the server. Is the scoring service running on {}?",
            self.base_url
        )
    }
}

impl ScoringApi for HttpScoringClient {
    fn post_payload(
        &self,
        endpoint: Endpoint,
        payload: &Payload,
    ) -> Result<ResponseBody, AppError> {
        let url = self.endpoint_url(endpoint);
        let body = serde_json::to_vec(payload)
            .map_err(|err| AppError::unexpected(format!("failed to encode payload: {err}")))?;

        tracing::debug!(
            target: "taskrank.http",
            stage = "request",
            url = %url,
            source = payload.source(),
            items = payload.len()
        );

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| AppError::network(self.unreachable_hint(), err.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|err| AppError::unexpected(format!("failed to read response body: {err}")))?;
        let body = ResponseBody::from_text(text);

        tracing::debug!(
            target: "taskrank.http",
            stage = "response",
            url = %url,
            status = %status,
            json = body.as_json().is_some()
        );

        if !status.is_success() {
            return Err(AppError::http(status.as_u16(), body));
        }

        Ok(body)
    }
}
