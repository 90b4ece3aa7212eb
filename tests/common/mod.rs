//! Common test utilities.
//!
//! `StubHub` is a throwaway orchestrator hub: an actix-web server on an
//! ephemeral port that records every request and answers with a fixed reply.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::Value;

use bidtabs_data::api::ApiState;
use bidtabs_data::hub::{HubClient, HubClientConfig};
use bidtabs_data::models::AgentIdentity;
use bidtabs_data::services::MetadataService;

/// Timeout used by clients pointed at a stub hub.
pub const TEST_HUB_TIMEOUT: Duration = Duration::from_millis(500);

/// How the stub answers every request.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with the given JSON body.
    Json(Value),
    /// Empty body with the given status.
    Status(u16),
    /// 200 with a non-JSON body.
    Raw(&'static str),
    /// Sleep, then 200 with `{}`.
    Delay(Duration),
}

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Value,
}

struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubHub {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubHub {
    /// Start a stub hub. Must be called inside an actix system.
    pub async fn start(reply: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            reply,
            requests: Arc::clone(&requests),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl Drop for StubHub {
    fn drop(&mut self) {
        // Sends the stop command immediately; completion is not awaited
        let _ = self.handle.stop(false);
    }
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().push(RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        body,
    });

    match &state.reply {
        StubReply::Json(value) => HttpResponse::Ok().json(value),
        StubReply::Status(code) => HttpResponse::build(StatusCode::from_u16(*code).unwrap()).finish(),
        StubReply::Raw(text) => HttpResponse::Ok().content_type("text/html").body(*text),
        StubReply::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            HttpResponse::Ok().json(serde_json::json!({}))
        }
    }
}

/// Hub client pointed at `hub_url` with the default identity.
pub fn hub_client(hub_url: &str) -> HubClient {
    let config = HubClientConfig::new(hub_url, AgentIdentity::default()).with_timeout(TEST_HUB_TIMEOUT);
    HubClient::new(config).unwrap()
}

/// API state for a service talking to `hub_url` and serving `data_root`.
pub fn test_state(hub_url: &str, data_root: impl Into<PathBuf>) -> ApiState {
    ApiState::new(MetadataService::new(hub_client(hub_url), data_root))
}
