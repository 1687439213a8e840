//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use planet::Trace;
#[cfg(debug_assertions)]
use planet::doc::ApiDoc;
use planet::domain::EventsQueryService;
use planet::domain::ports::{EventsQuery, FixtureEventsQuery};
use planet::inbound::http::events::{get_collection, get_organization_ids};
use planet::inbound::http::health::{ServiceStatus, live, ready};
use planet::inbound::http::state::HttpState;
use planet::outbound::persistence::{DbPool, DieselEventStore};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Seconds in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Build the read port: database-backed when a pool is configured, otherwise
/// the empty fixture.
fn build_events_query(pool: Option<&DbPool>) -> Arc<dyn EventsQuery> {
    match pool {
        Some(pool) => {
            let store = Arc::new(DieselEventStore::new(pool.clone()));
            Arc::new(EventsQueryService::new(store))
        }
        None => Arc::new(FixtureEventsQuery),
    }
}

fn build_app(
    status: web::Data<ServiceStatus>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(status)
        .app_data(http_state)
        .wrap(Trace)
        .service(get_collection)
        .service(get_organization_ids)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server reporting its lifecycle through `status`.
///
/// The server stops accepting connections on SIGINT/SIGTERM and gives
/// in-flight requests ten seconds to complete.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    status: web::Data<ServiceStatus>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = web::Data::new(HttpState::new(build_events_query(db_pool.as_ref())));
    let app_status = status.clone();

    let server = HttpServer::new(move || build_app(app_status.clone(), http_state.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "http server listening");
    status.serving();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn call(uri: &str) -> ServiceResponse {
        let status = web::Data::new(ServiceStatus::new());
        status.serving();
        let state = web::Data::new(HttpState::new(build_events_query(None)));
        let app = test::init_service(build_app(status, state)).await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[rstest]
    #[case("/files/collection", json!({"type": "FeatureCollection", "features": []}))]
    #[case("/organizations/ids", json!({"org_ids": []}))]
    #[actix_web::test]
    async fn fixture_backed_app_serves_empty_results(#[case] uri: &str, #[case] expected: Value) {
        let res = call(uri).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn health_routes_are_mounted(#[case] uri: &str) {
        assert_eq!(call(uri).await.status(), StatusCode::OK);
    }
}
