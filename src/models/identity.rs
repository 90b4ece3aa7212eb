//! Agent identity announced to the orchestrator hub

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capabilities announced when the caller does not supply any
pub const DEFAULT_CAPABILITIES: [&str; 3] = ["bidtabs", "dataset", "metadata"];

/// Returns [`DEFAULT_CAPABILITIES`] as owned strings
pub fn default_capabilities() -> Vec<String> {
    DEFAULT_CAPABILITIES.iter().map(|c| c.to_string()).collect()
}

/// Identity of this agent as seen by the hub.
///
/// Built once from the loaded settings and shared read-only for the rest of
/// the process. Fields are private so nothing can change the announced
/// address or capabilities after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentIdentity {
    name: String,
    base_url: String,
    capabilities: Vec<String>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl AgentIdentity {
    /// Create a new identity with empty metadata
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        capabilities: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            capabilities,
            metadata: Map::new(),
        }
    }

    /// Attach static metadata to the identity
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Build the registration payload for the given capabilities.
    ///
    /// `None` or an empty list falls back to [`DEFAULT_CAPABILITIES`],
    /// whatever the identity itself advertises.
    pub fn registration(&self, capabilities: Option<Vec<String>>) -> RegistrationPayload<'_> {
        let capabilities = match capabilities {
            Some(caps) if !caps.is_empty() => caps,
            _ => default_capabilities(),
        };

        RegistrationPayload {
            name: &self.name,
            base_url: &self.base_url,
            capabilities,
            metadata: &self.metadata,
        }
    }
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self::new("BidTabsData", "http://127.0.0.1:9008", default_capabilities())
    }
}

/// Body of `POST /registry/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPayload<'a> {
    pub name: &'a str,
    pub base_url: &'a str,
    pub capabilities: Vec<String>,
    pub metadata: &'a Map<String, Value>,
}
