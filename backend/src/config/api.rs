//! HTTP server settings.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ENV: &str = "dev";

/// Deployment environment tag; `prod` switches logs to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentEnv {
    /// Human-readable logs.
    Development,
    /// JSON logs.
    Production,
}

/// Settings for the `planet-api` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API")]
pub struct ApiSettings {
    /// Listening port.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Environment tag such as `dev` or `prod`.
    #[ortho_config(default = DEFAULT_ENV.to_owned())]
    pub env: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            env: DEFAULT_ENV.to_owned(),
        }
    }
}

impl ApiSettings {
    /// Environment tag interpreted; anything other than `prod` is development.
    pub fn deployment(&self) -> DeploymentEnv {
        if self.env.trim().eq_ignore_ascii_case("prod") {
            DeploymentEnv::Production
        } else {
            DeploymentEnv::Development
        }
    }

    /// Address the server binds to on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
