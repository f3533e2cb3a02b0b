//! Typed domain model for the Tavily API.
//!
//! The request structs double as the validated form of tool arguments: the
//! dispatcher deserializes raw JSON arguments into these types before
//! anything is sent upstream, so malformed input is rejected at the protocol
//! boundary instead of surfacing as an opaque API failure.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Depth setting shared by the search and extract endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Basic,
    Advanced,
}

/// Search category. Selects which upstream agent handles the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    General,
    News,
}

/// Relative time window for search results. The API accepts both the long
/// and single-letter spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
    D,
    W,
    M,
    Y,
}

/// Arguments accepted by the `tavily-search` tool.
///
/// `topic` is accepted from callers but never forwarded: the gateway derives
/// the effective topic from the query text (see [`crate::domains::tavily::TavilyClient`]).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: Option<Depth>,
    pub topic: Option<Topic>,
    pub days: Option<u32>,
    pub time_range: Option<TimeRange>,
    pub max_results: Option<u32>,
    pub include_images: Option<bool>,
    pub include_image_descriptions: Option<bool>,
    pub include_raw_content: Option<bool>,
    /// Domain allowlist. Absent or non-array values collapse to empty.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub include_domains: Vec<String>,
    /// Domain blocklist, coerced the same way as `include_domains`.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub exclude_domains: Vec<String>,
}

impl SearchRequest {
    /// Check range constraints the schema advertises. The bounds are
    /// enforced, not clamped.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max_results) = self.max_results {
            if !(5..=20).contains(&max_results) {
                return Err(format!(
                    "max_results must be between 5 and 20, got {}",
                    max_results
                ));
            }
        }
        Ok(())
    }
}

/// Arguments accepted by the `tavily-extract` tool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub extract_depth: Option<Depth>,
    pub include_images: Option<bool>,
}

impl ExtractRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.urls.is_empty() {
            return Err("urls must contain at least one URL".to_string());
        }
        Ok(())
    }
}

/// Accept a JSON array and keep its string elements; coerce everything else
/// (including a bare string) to an empty list.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let list = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}

// ============================================================================
// Response Types
// ============================================================================

/// Response body returned by both the search and extract endpoints.
///
/// Extract responses omit most of these fields, so everything except the
/// result list is optional or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TavilyResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<TavilyResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<TavilyImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

/// A single search hit or extracted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TavilyResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
}

/// Images come back either as bare URLs or as objects with a description,
/// depending on `include_image_descriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TavilyImage {
    Url(String),
    Described {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_minimal() {
        let request: SearchRequest = serde_json::from_value(json!({"query": "rust"})).unwrap();
        assert_eq!(request.query, "rust");
        assert_eq!(request.search_depth, None);
        assert_eq!(request.topic, None);
        assert_eq!(request.max_results, None);
        assert!(request.include_domains.is_empty());
        assert!(request.exclude_domains.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_search_request_full() {
        let request: SearchRequest = serde_json::from_value(json!({
            "query": "rust async",
            "search_depth": "advanced",
            "topic": "news",
            "days": 7,
            "time_range": "w",
            "max_results": 15,
            "include_images": true,
            "include_image_descriptions": true,
            "include_raw_content": false,
            "include_domains": ["rust-lang.org"],
            "exclude_domains": ["example.com"]
        }))
        .unwrap();
        assert_eq!(request.search_depth, Some(Depth::Advanced));
        assert_eq!(request.topic, Some(Topic::News));
        assert_eq!(request.days, Some(7));
        assert_eq!(request.time_range, Some(TimeRange::W));
        assert_eq!(request.max_results, Some(15));
        assert_eq!(request.include_domains, vec!["rust-lang.org".to_string()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_search_request_missing_query() {
        let result = serde_json::from_value::<SearchRequest>(json!({"max_results": 10}));
        assert!(result.is_err());
    }

    #[test]
    fn test_search_request_ignores_unknown_fields() {
        let request: SearchRequest =
            serde_json::from_value(json!({"query": "rust", "bogus": 42})).unwrap();
        assert_eq!(request.query, "rust");
    }

    #[test]
    fn test_domains_coerce_non_array_to_empty() {
        let request: SearchRequest = serde_json::from_value(json!({
            "query": "rust",
            "include_domains": "rust-lang.org",
            "exclude_domains": 17
        }))
        .unwrap();
        assert!(request.include_domains.is_empty());
        assert!(request.exclude_domains.is_empty());
    }

    #[test]
    fn test_domains_drop_non_string_elements() {
        let request: SearchRequest = serde_json::from_value(json!({
            "query": "rust",
            "include_domains": ["a.org", 7, null, "b.org"]
        }))
        .unwrap();
        assert_eq!(
            request.include_domains,
            vec!["a.org".to_string(), "b.org".to_string()]
        );
    }

    #[test]
    fn test_max_results_bounds() {
        let mut request: SearchRequest =
            serde_json::from_value(json!({"query": "rust"})).unwrap();

        request.max_results = Some(4);
        assert!(request.validate().is_err());
        request.max_results = Some(5);
        assert!(request.validate().is_ok());
        request.max_results = Some(20);
        assert!(request.validate().is_ok());
        request.max_results = Some(21);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_time_range_spellings() {
        let long: TimeRange = serde_json::from_value(json!("month")).unwrap();
        let short: TimeRange = serde_json::from_value(json!("m")).unwrap();
        assert_eq!(long, TimeRange::Month);
        assert_eq!(short, TimeRange::M);
    }

    #[test]
    fn test_extract_request_requires_urls() {
        let result = serde_json::from_value::<ExtractRequest>(json!({"extract_depth": "basic"}));
        assert!(result.is_err());

        let empty: ExtractRequest = serde_json::from_value(json!({"urls": []})).unwrap();
        assert!(empty.validate().is_err());

        let ok: ExtractRequest =
            serde_json::from_value(json!({"urls": ["https://example.com"]})).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_response_mixed_image_shapes() {
        let response: TavilyResponse = serde_json::from_value(json!({
            "query": "rust",
            "results": [],
            "images": [
                "https://example.com/a.png",
                {"url": "https://example.com/b.png", "description": "diagram"}
            ]
        }))
        .unwrap();
        let images = response.images.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(
            images[0],
            TavilyImage::Url("https://example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_extract_response_defaults_missing_fields() {
        let response: TavilyResponse = serde_json::from_value(json!({
            "results": [{"url": "https://example.com", "raw_content": "body text"}]
        }))
        .unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "");
        assert_eq!(response.results[0].content, "");
        assert_eq!(
            response.results[0].raw_content.as_deref(),
            Some("body text")
        );
    }
}
