//! BidTabsData - Main Entry Point
//!
//! Starts the HTTP server and announces the agent to the orchestrator hub.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bidtabs_data::api::ApiState;
use bidtabs_data::config::Settings;
use bidtabs_data::metrics::init_metrics;
use bidtabs_data::server;
use bidtabs_data::services::MetadataService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    // Initialize logging with RUST_LOG environment variable support
    // Default: info level for bidtabs_data, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bidtabs_data=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true))
        .init();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}, using defaults", e);
        Settings::default()
    });

    info!(
        "Starting BidTabsData v{} ({})",
        env!("CARGO_PKG_VERSION"),
        settings.agent.name
    );
    info!("HTTP: {}", settings.bind_address());
    info!("Hub: {}", settings.hub.url);
    info!("Data root: {}", settings.data.root);

    if settings.metrics.enabled {
        init_metrics();
    }

    let service = MetadataService::from_settings(&settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // Bind before announcing so the advertised address is already listening
    let (server, addrs) = server::bind(&settings, ApiState::new(service.clone()))?;
    info!("Listening on {:?}", addrs);

    // Startup registration runs alongside the server, never gating it
    let _registration = service.spawn_startup_registration();

    server.await
}
