//! BidTabsData - Dataset Metadata Service
//!
//! A small HTTP service that:
//! - Exposes the BidTabsData file inventory
//! - Registers itself with the orchestrator hub
//! - Publishes and queries shared knowledge through the hub

pub mod config;
pub mod models;
pub mod hub;
pub mod inventory;
pub mod services;
pub mod api;
pub mod metrics;
pub mod server;

// Re-export commonly used types
pub use config::Settings;
pub use models::{AgentIdentity, KnowledgeItem, KnowledgeQuery, KnowledgeResult, ServiceError, ServiceResult};
pub use hub::{HubClient, HubClientConfig};
pub use inventory::DataInventory;
pub use services::MetadataService;

/// Version of the bidtabs-data service
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
