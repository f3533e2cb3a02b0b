//! HTTP gateway to the Tavily API.
//!
//! One POST per tool call, JSON in and JSON out. The credential travels with
//! each call as an explicit parameter; nothing credential-shaped is stored on
//! the shared client or its default headers.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::core::config::ApiKey;

use super::error::TavilyError;
use super::types::{Depth, ExtractRequest, SearchRequest, TavilyResponse, TimeRange, Topic};

const SEARCH_URL: &str = "https://api.tavily.com/search";
const EXTRACT_URL: &str = "https://api.tavily.com/extract";

/// Boundary to the upstream search service.
///
/// The dispatcher only talks to this trait, so tests can swap in a double
/// and count calls instead of touching the network.
#[async_trait]
pub trait TavilyGateway: Send + Sync {
    async fn search(
        &self,
        api_key: &ApiKey,
        request: &SearchRequest,
    ) -> Result<TavilyResponse, TavilyError>;

    async fn extract(
        &self,
        api_key: &ApiKey,
        request: &ExtractRequest,
    ) -> Result<TavilyResponse, TavilyError>;
}

/// Live gateway backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct TavilyClient {
    http: reqwest::Client,
}

impl TavilyClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn post<P: Serialize>(
        &self,
        url: &str,
        api_key: &ApiKey,
        payload: &P,
    ) -> Result<TavilyResponse, TavilyError> {
        let response = self
            .http
            .post(url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("x-api-key", api_key.as_str())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }
}

#[async_trait]
impl TavilyGateway for TavilyClient {
    async fn search(
        &self,
        api_key: &ApiKey,
        request: &SearchRequest,
    ) -> Result<TavilyResponse, TavilyError> {
        debug!("Sending search request for query: {}", request.query);
        let payload = SearchPayload::new(api_key, request);
        self.post(SEARCH_URL, api_key, &payload).await
    }

    async fn extract(
        &self,
        api_key: &ApiKey,
        request: &ExtractRequest,
    ) -> Result<TavilyResponse, TavilyError> {
        debug!("Sending extract request for {} url(s)", request.urls.len());
        let payload = ExtractPayload::new(api_key, request);
        self.post(EXTRACT_URL, api_key, &payload).await
    }
}

/// Map a non-success status to a gateway error, keeping the body message for
/// statuses without a dedicated variant.
fn classify_error(status: reqwest::StatusCode, body: &str) -> TavilyError {
    match status.as_u16() {
        401 => TavilyError::InvalidApiKey,
        429 => TavilyError::UsageLimitExceeded,
        _ => TavilyError::Api {
            status,
            message: api_message(status, body),
        },
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw body and then to the status reason phrase.
fn api_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// If the query mentions news, route to the news agent. The caller-supplied
/// topic is never forwarded; absence of the keyword sends no topic at all.
fn effective_topic(query: &str) -> Option<Topic> {
    if query.to_lowercase().contains("news") {
        Some(Topic::News)
    } else {
        None
    }
}

/// Wire form of a search call. Optional fields stay absent when the caller
/// omitted them; the domain lists are always present, possibly empty.
///
/// Payloads carry the raw credential, hence no Debug impl.
#[derive(Serialize)]
struct SearchPayload<'a> {
    api_key: &'a str,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_depth: Option<Depth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_image_descriptions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_raw_content: Option<bool>,
    include_domains: &'a [String],
    exclude_domains: &'a [String],
}

impl<'a> SearchPayload<'a> {
    fn new(api_key: &'a ApiKey, request: &'a SearchRequest) -> Self {
        Self {
            api_key: api_key.as_str(),
            query: &request.query,
            search_depth: request.search_depth,
            topic: effective_topic(&request.query),
            days: request.days,
            time_range: request.time_range,
            max_results: request.max_results,
            include_images: request.include_images,
            include_image_descriptions: request.include_image_descriptions,
            include_raw_content: request.include_raw_content,
            include_domains: &request.include_domains,
            exclude_domains: &request.exclude_domains,
        }
    }
}

/// Wire form of an extract call.
#[derive(Serialize)]
struct ExtractPayload<'a> {
    api_key: &'a str,
    urls: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    extract_depth: Option<Depth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_images: Option<bool>,
}

impl<'a> ExtractPayload<'a> {
    fn new(api_key: &'a ApiKey, request: &'a ExtractRequest) -> Self {
        Self {
            api_key: api_key.as_str(),
            urls: &request.urls,
            extract_depth: request.extract_depth,
            include_images: request.include_images,
        }
    }
}
