//! Health check endpoints

use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<f64>,
}

impl HealthResponse {
    pub fn new(status: &str, version: &str) -> Self {
        Self {
            status: status.to_string(),
            version: version.to_string(),
            uptime_seconds: None,
        }
    }

    pub fn with_uptime(mut self, uptime: f64) -> Self {
        self.uptime_seconds = Some(uptime);
        self
    }
}

/// Health check endpoint
#[get("/health")]
pub async fn health_check(state: web::Data<ApiState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::new("ok", state.service.version()))
}

/// Readiness check endpoint.
///
/// Ready as soon as the server accepts requests; hub registration has no
/// bearing on it.
#[get("/ready")]
pub async fn readiness_check(state: web::Data<ApiState>) -> HttpResponse {
    let response = HealthResponse::new("ready", state.service.version())
        .with_uptime(state.service.uptime_seconds());
    HttpResponse::Ok().json(response)
}

/// Liveness check endpoint
#[get("/live")]
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive"
    }))
}

/// Configure health routes
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
