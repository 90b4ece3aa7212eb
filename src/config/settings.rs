//! Service configuration settings

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::{default_capabilities, AgentIdentity};

/// Plain environment variable names used by existing deployments, mapped to
/// their settings keys. These take precedence over every other source.
pub const LEGACY_ENV_OVERRIDES: [(&str, &str); 6] = [
    ("ROADSCRIPT_HUB_URL", "hub.url"),
    ("AGENT_NAME", "agent.name"),
    ("AGENT_BASE_URL", "agent.base_url"),
    ("BIDTABSDATA_PATH", "data.root"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
];

/// Main service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub agent: AgentSettings,
    pub hub: HubSettings,
    pub server: ServerSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// Identity this agent announces to the hub
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    /// Logical agent name
    #[serde(default = "default_agent_name")]
    pub name: String,
    /// Address at which this agent's API is reachable
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,
    /// Capabilities reported by `/agent/info`
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
}

fn default_agent_name() -> String {
    "BidTabsData".to_string()
}

fn default_agent_base_url() -> String {
    "http://127.0.0.1:9008".to_string()
}

/// Orchestrator hub settings
#[derive(Debug, Clone, Deserialize)]
pub struct HubSettings {
    /// Base address of the hub
    #[serde(default = "default_hub_url")]
    pub url: String,
    /// Timeout for every hub request, in seconds
    #[serde(default = "default_hub_timeout")]
    pub timeout_sec: u64,
}

fn default_hub_url() -> String {
    "http://127.0.0.1:9000".to_string()
}

fn default_hub_timeout() -> u64 {
    5
}

impl HubSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9008
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Root directory of the dataset files
    #[serde(default = "default_data_root")]
    pub root: String,
}

fn default_data_root() -> String {
    "./data".to_string()
}

/// Metrics settings
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// Expose Prometheus metrics at `/metrics`
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MetricsSettings {
    fn default() -> Self {
        MetricsSettings { enabled: true }
    }
}

impl Settings {
    /// Load settings from `config.*`, `BIDTABS_*` variables and the legacy
    /// plain variable names
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config", |name| std::env::var(name).ok())
    }

    /// Load settings from a specific config file path (without extension).
    ///
    /// `lookup` resolves the legacy variable names so callers can supply
    /// something other than the process environment.
    pub fn load_from<P, F>(path: P, lookup: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let config_path = path.as_ref();

        let builder = Self::defaults()?
            // Add config file if it exists
            .add_source(File::with_name(config_path.to_str().unwrap_or("config")).required(false))
            // Add environment variables with prefix BIDTABS_
            .add_source(
                Environment::with_prefix("BIDTABS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("agent.capabilities")
                    .try_parsing(true),
            );

        let builder = Self::legacy_overrides(builder, lookup)?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.timeout_sec == 0 {
            return Err(ConfigError::Message(
                "hub.timeout_sec must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("agent.name", default_agent_name())?
            .set_default("agent.base_url", default_agent_base_url())?
            .set_default("agent.capabilities", default_capabilities())?
            .set_default("hub.url", default_hub_url())?
            .set_default("hub.timeout_sec", default_hub_timeout() as i64)?
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("data.root", default_data_root())?
            .set_default("metrics.enabled", true)
    }

    fn legacy_overrides<F>(
        builder: ConfigBuilder<DefaultState>,
        lookup: F,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        LEGACY_ENV_OVERRIDES
            .iter()
            .try_fold(builder, |builder, (var, key)| {
                builder.set_override_option(*key, lookup(*var))
            })
    }

    /// Identity announced to the hub
    pub fn agent_identity(&self) -> AgentIdentity {
        AgentIdentity::new(
            self.agent.name.clone(),
            self.agent.base_url.clone(),
            self.agent.capabilities.clone(),
        )
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            agent: AgentSettings {
                name: default_agent_name(),
                base_url: default_agent_base_url(),
                capabilities: default_capabilities(),
            },
            hub: HubSettings {
                url: default_hub_url(),
                timeout_sec: default_hub_timeout(),
            },
            server: ServerSettings {
                host: default_host(),
                port: default_port(),
                workers: default_workers(),
            },
            data: DataSettings {
                root: default_data_root(),
            },
            metrics: MetricsSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_file() -> std::path::PathBuf {
        tempfile::tempdir().unwrap().path().join("missing")
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 9008);
        assert_eq!(settings.hub.url, "http://127.0.0.1:9000");
        assert_eq!(settings.hub.timeout(), Duration::from_secs(5));
        assert_eq!(settings.agent.name, "BidTabsData");
        assert_eq!(settings.agent.capabilities, vec!["bidtabs", "dataset", "metadata"]);
    }

    #[test]
    fn test_load_without_sources_matches_defaults() {
        let settings = Settings::load_from(no_file(), |_| None).unwrap();
        assert_eq!(settings.agent.base_url, "http://127.0.0.1:9008");
        assert_eq!(settings.data.root, "./data");
        assert_eq!(settings.agent.capabilities, default_capabilities());
    }

    #[test]
    fn test_legacy_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ROADSCRIPT_HUB_URL", "http://hub.internal:9100"),
            ("AGENT_NAME", "BidTabsStaging"),
            ("PORT", "9100"),
        ]
        .into_iter()
        .collect();

        let settings =
            Settings::load_from(no_file(), |name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.hub.url, "http://hub.internal:9100");
        assert_eq!(settings.agent.name, "BidTabsStaging");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.agent.base_url, "http://127.0.0.1:9008");
    }

    #[test]
    fn test_config_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(
            &path,
            "[agent]\nname = \"FromFile\"\ncapabilities = [\"dataset\"]\n\n[hub]\ntimeout_sec = 2\n",
        )
        .unwrap();

        let settings = Settings::load_from(dir.path().join("service"), |_| None).unwrap();
        assert_eq!(settings.agent.name, "FromFile");
        assert_eq!(settings.agent.capabilities, vec!["dataset"]);
        assert_eq!(settings.hub.timeout_sec, 2);
    }

    #[test]
    fn test_zero_hub_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("service.toml"), "[hub]\ntimeout_sec = 0\n").unwrap();

        let err = Settings::load_from(dir.path().join("service"), |_| None).unwrap_err();
        assert!(err.to_string().contains("hub.timeout_sec"));
    }

    #[test]
    fn test_agent_identity_from_settings() {
        let settings = Settings::default();
        let identity = settings.agent_identity();
        assert_eq!(identity.name(), "BidTabsData");
        assert_eq!(identity.capabilities(), default_capabilities().as_slice());
    }
}
