//! API entry-point: loads settings, connects to PostgreSQL and serves the
//! read endpoints, health checks and (in debug builds) Swagger UI.

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::info;

use planet::config::{ApiSettings, DatabaseSettings, DeploymentEnv};
use planet::inbound::http::health::ServiceStatus;
use planet::outbound::persistence::{DbPool, PoolConfig};
use planet::telemetry::init_tracing;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let program = [OsString::from("planet-api")];
    let api = ApiSettings::load_from_iter(program.clone())
        .map_err(|error| io::Error::other(format!("load api settings: {error}")))?;
    init_tracing(api.deployment() == DeploymentEnv::Production);

    let database = DatabaseSettings::load_from_iter(program)
        .map_err(|error| io::Error::other(format!("load database settings: {error}")))?;
    info!(env = %api.env, ?database, "starting api");

    let pool = DbPool::connect_lazy(PoolConfig::shared(&database));

    let status = web::Data::new(ServiceStatus::new());
    let config = ServerConfig::new(api.bind_addr()).with_db_pool(pool);
    let server = create_server(status.clone(), config)?;
    let result = server.await;
    status.draining();
    info!("api stopped");
    result
}
