//! REST API endpoints using Actix-Web

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::responses::StatusResponse;
use crate::models::{KnowledgeItem, KnowledgeQuery, KnowledgeQueryParams};
use crate::services::MetadataService;

use super::health::configure_health_routes;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<MetadataService>,
}

impl ApiState {
    pub fn new(service: MetadataService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Configure all REST API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Health endpoints at root
    configure_health_routes(cfg);

    cfg
        // Agent routes
        .service(
            web::scope("/agent")
                .route("/info", web::get().to(agent_info))
                .route("/register", web::post().to(agent_register))
                .route("/knowledge/publish", web::post().to(publish_knowledge))
                .route("/knowledge/query", web::get().to(query_knowledge))
        )
        // Dataset routes
        .service(
            web::scope("/data")
                .route("/summary", web::get().to(data_summary))
                .route("/files", web::get().to(data_files))
        );
}

// ============================================================================
// Agent Handlers
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AgentInfoResponse {
    pub name: String,
    pub capabilities: Vec<String>,
}

async fn agent_info(state: web::Data<ApiState>) -> HttpResponse {
    let identity = state.service.identity();
    HttpResponse::Ok().json(AgentInfoResponse {
        name: identity.name().to_string(),
        capabilities: identity.capabilities().to_vec(),
    })
}

async fn agent_register(state: web::Data<ApiState>) -> HttpResponse {
    state.service.reregister().await;
    HttpResponse::Ok().json(StatusResponse::registered())
}

async fn publish_knowledge(
    state: web::Data<ApiState>,
    body: web::Json<KnowledgeItem>,
) -> HttpResponse {
    state.service.publish(body.into_inner()).await;
    HttpResponse::Ok().json(StatusResponse::queued())
}

async fn query_knowledge(
    state: web::Data<ApiState>,
    params: web::Query<KnowledgeQueryParams>,
) -> Result<HttpResponse, actix_web::Error> {
    let query = KnowledgeQuery::from(params.into_inner());

    let items = state.service
        .query(&query)
        .await
        .map_err(|e| actix_web::error::InternalError::from_response(
            e.to_string(),
            HttpResponse::from(e)
        ))?;

    Ok(HttpResponse::Ok().json(items))
}

// ============================================================================
// Dataset Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FilesQuery {
    #[serde(default)]
    pub pattern: String,
}

async fn data_summary(
    state: web::Data<ApiState>,
) -> Result<HttpResponse, actix_web::Error> {
    let summary = state.service
        .data_summary()
        .await
        .map_err(|e| actix_web::error::InternalError::from_response(
            e.to_string(),
            HttpResponse::from(e)
        ))?;

    Ok(HttpResponse::Ok().json(summary))
}

async fn data_files(
    state: web::Data<ApiState>,
    query: web::Query<FilesQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let files = state.service
        .data_files(query.into_inner().pattern)
        .await
        .map_err(|e| actix_web::error::InternalError::from_response(
            e.to_string(),
            HttpResponse::from(e)
        ))?;

    Ok(HttpResponse::Ok().json(files))
}
