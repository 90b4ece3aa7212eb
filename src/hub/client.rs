//! Orchestrator hub client
//!
//! Registration and knowledge publication are announcements: their failures
//! are logged and dropped, so `register` and `publish_knowledge` return `()`.
//! Knowledge queries are reads the caller depends on, so `query_knowledge`
//! returns a `ServiceResult`. The fallible `try_register` and `try_publish`
//! expose the underlying outcome for callers that want it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::metrics;
use crate::models::{
    AgentIdentity, KnowledgeItem, KnowledgeQuery, KnowledgeResult, ServiceError, ServiceResult,
};

/// Default timeout for every hub request
pub const DEFAULT_HUB_TIMEOUT: Duration = Duration::from_secs(5);

const REGISTER_PATH: &str = "/registry/register";
const INGEST_PATH: &str = "/knowledge/ingest";
const QUERY_PATH: &str = "/knowledge/query";

/// Immutable hub client configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    /// Base address of the hub, without trailing slash
    pub hub_url: String,
    /// Identity announced on registration
    pub identity: AgentIdentity,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HubClientConfig {
    pub fn new(hub_url: impl Into<String>, identity: AgentIdentity) -> Self {
        Self {
            hub_url: hub_url.into().trim_end_matches('/').to_string(),
            identity,
            timeout: DEFAULT_HUB_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&Settings> for HubClientConfig {
    fn from(settings: &Settings) -> Self {
        HubClientConfig::new(settings.hub.url.clone(), settings.agent_identity())
            .with_timeout(settings.hub.timeout())
    }
}

/// Client for the orchestrator hub
#[derive(Clone)]
pub struct HubClient {
    config: Arc<HubClientConfig>,
    http_client: reqwest::Client,
}

impl HubClient {
    /// Create a new hub client
    pub fn new(config: HubClientConfig) -> ServiceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.config.identity
    }

    pub fn hub_url(&self) -> &str {
        &self.config.hub_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.hub_url, path)
    }

    /// Announce this agent to the hub. Failures are logged, never returned.
    pub async fn register(&self, capabilities: Option<Vec<String>>) {
        match self.try_register(capabilities).await {
            Ok(()) => info!("Registered {} with orchestrator", self.identity().name()),
            Err(e) => warn!(
                hub_url = %self.config.hub_url,
                error = %e,
                "Unable to register with orchestrator"
            ),
        }
    }

    /// Register with the hub and report the outcome
    pub async fn try_register(&self, capabilities: Option<Vec<String>>) -> ServiceResult<()> {
        let payload = self.config.identity.registration(capabilities);
        self.post_json("register", REGISTER_PATH, &payload).await
    }

    /// Send a knowledge item to the hub. Failures are logged, never returned.
    pub async fn publish_knowledge(&self, item: KnowledgeItem) {
        match self.try_publish(&item).await {
            Ok(()) => {
                metrics::record_knowledge_published();
                debug!(keys = item.len(), "Published knowledge item");
            }
            Err(e) => warn!(
                hub_url = %self.config.hub_url,
                error = %e,
                "Unable to publish knowledge"
            ),
        }
    }

    /// Publish a knowledge item and report the outcome
    pub async fn try_publish(&self, item: &KnowledgeItem) -> ServiceResult<()> {
        self.post_json("publish", INGEST_PATH, item).await
    }

    /// Query knowledge items from the hub
    pub async fn query_knowledge(&self, query: &KnowledgeQuery) -> ServiceResult<KnowledgeResult> {
        let url = format!("{}?{}", self.endpoint(QUERY_PATH), query.to_query_string());
        let started = Instant::now();

        let result = self.fetch_items(&url).await;
        metrics::record_hub_request("query", result.is_ok(), started.elapsed());

        result
    }

    async fn fetch_items(&self, url: &str) -> ServiceResult<KnowledgeResult> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::hub_status(response.status().as_u16(), url));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &T,
    ) -> ServiceResult<()> {
        let url = self.endpoint(path);
        let started = Instant::now();

        let result = self.send_json(&url, body).await;
        metrics::record_hub_request(operation, result.is_ok(), started.elapsed());

        result
    }

    async fn send_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> ServiceResult<()> {
        let response = self.http_client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::hub_status(response.status().as_u16(), url));
        }

        Ok(())
    }
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
            .field("hub_url", &self.config.hub_url)
            .field("agent", &self.config.identity.name())
            .finish()
    }
}
