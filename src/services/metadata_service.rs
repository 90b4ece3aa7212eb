//! Metadata service: hub lifecycle and dataset access
//!
//! Backs the HTTP handlers. Startup registration runs as a spawned task so
//! the server can accept requests before the hub has answered.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Settings;
use crate::hub::{HubClient, HubClientConfig};
use crate::inventory::{DataInventory, DataSummary, FileEntry};
use crate::models::{AgentIdentity, KnowledgeItem, KnowledgeQuery, KnowledgeResult, ServiceError, ServiceResult};

/// Shared service state
#[derive(Debug, Clone)]
pub struct MetadataService {
    hub: HubClient,
    inventory: DataInventory,
    version: String,
    start_time: DateTime<Utc>,
}

impl MetadataService {
    pub fn new(hub: HubClient, data_root: impl Into<PathBuf>) -> Self {
        Self {
            hub,
            inventory: DataInventory::new(data_root),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Utc::now(),
        }
    }

    /// Build the service and its hub client from loaded settings
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        let hub = HubClient::new(HubClientConfig::from(settings))?;
        Ok(Self::new(hub, settings.data.root.clone()))
    }

    pub fn identity(&self) -> &AgentIdentity {
        self.hub.identity()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn uptime_seconds(&self) -> f64 {
        let duration = Utc::now().signed_duration_since(self.start_time);
        duration.num_milliseconds() as f64 / 1000.0
    }

    /// Register with the hub in the background.
    ///
    /// Must be called from within the runtime. The task ends after one
    /// attempt, bounded by the hub timeout.
    pub fn spawn_startup_registration(&self) -> JoinHandle<()> {
        let hub = self.hub.clone();
        info!(hub_url = %hub.hub_url(), "Scheduling startup registration");
        actix_web::rt::spawn(async move {
            hub.register(None).await;
        })
    }

    /// Repeat registration with the default capabilities
    pub async fn reregister(&self) {
        self.hub.register(None).await;
    }

    /// Forward a knowledge item to the hub, best effort
    pub async fn publish(&self, item: KnowledgeItem) {
        self.hub.publish_knowledge(item).await;
    }

    /// Query the hub for knowledge items
    pub async fn query(&self, query: &KnowledgeQuery) -> ServiceResult<KnowledgeResult> {
        self.hub.query_knowledge(query).await
    }

    /// Summarize the dataset on the blocking pool
    pub async fn data_summary(&self) -> ServiceResult<DataSummary> {
        let inventory = self.inventory.clone();
        actix_web::web::block(move || inventory.summary())
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))
    }

    /// List dataset files matching `pattern` on the blocking pool
    pub async fn data_files(&self, pattern: String) -> ServiceResult<Vec<FileEntry>> {
        let inventory = self.inventory.clone();
        actix_web::web::block(move || inventory.find_files(&pattern))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))
    }
}
