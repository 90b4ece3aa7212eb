//! HTTP server assembly

use std::net::SocketAddr;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::api::{configure_routes, ApiState};
use crate::config::Settings;
use crate::metrics::metrics_endpoint;

/// Build the application with shared state, middleware and routes
pub fn create_app(
    state: ApiState,
    metrics_enabled: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(middleware::Compress::default())
        .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
        .wrap(TracingLogger::default())
        .configure(configure_routes)
        .configure(move |cfg| {
            if metrics_enabled {
                cfg.service(metrics_endpoint);
            }
        })
}

/// Bind the HTTP server without starting it.
///
/// Returns the server future together with the bound addresses, which
/// differ from the configured port when it is 0.
pub fn bind(settings: &Settings, state: ApiState) -> std::io::Result<(Server, Vec<SocketAddr>)> {
    let metrics_enabled = settings.metrics.enabled;

    let server = HttpServer::new(move || create_app(state.clone(), metrics_enabled))
        .workers(settings.server.workers.max(1))
        .bind(settings.bind_address())?;

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}
