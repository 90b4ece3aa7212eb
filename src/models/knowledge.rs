//! Knowledge items exchanged through the hub

use serde::Deserialize;
use serde_json::{Map, Value};

/// A fact shared with other agents. No schema is enforced here.
pub type KnowledgeItem = Map<String, Value>;

/// Items returned by the hub, passed through as-is
pub type KnowledgeResult = Vec<Value>;

/// Default number of items requested from the hub
pub const DEFAULT_QUERY_LIMIT: u32 = 50;

/// Upper bound applied to caller-supplied limits
pub const MAX_QUERY_LIMIT: u32 = 500;

/// Filter for `GET /knowledge/query`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeQuery {
    pub source: Option<String>,
    pub topic: Option<String>,
    pub tag: Option<String>,
    limit: u32,
}

impl KnowledgeQuery {
    pub fn new() -> Self {
        Self {
            source: None,
            topic: None,
            tag: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the result limit, clamped to `1..=MAX_QUERY_LIMIT`
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Encode the filter as a URL query string.
    ///
    /// Missing or empty filters are left out; `limit` is always last.
    pub fn to_query_string(&self) -> String {
        let filters = [
            ("source", &self.source),
            ("topic", &self.topic),
            ("tag", &self.tag),
        ];

        let mut parts: Vec<String> = filters
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{}={}", key, urlencoding::encode(v)))
            })
            .collect();
        parts.push(format!("limit={}", self.limit));

        parts.join("&")
    }
}

impl Default for KnowledgeQuery {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_limit(limit: i64) -> u32 {
    limit.clamp(1, MAX_QUERY_LIMIT as i64) as u32
}

/// Query parameters accepted by the service's own query endpoint
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeQueryParams {
    pub source: Option<String>,
    pub topic: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
}

impl From<KnowledgeQueryParams> for KnowledgeQuery {
    fn from(params: KnowledgeQueryParams) -> Self {
        KnowledgeQuery {
            source: params.source,
            topic: params.topic,
            tag: params.tag,
            limit: params
                .limit
                .map(clamp_limit)
                .unwrap_or(DEFAULT_QUERY_LIMIT),
        }
    }
}
