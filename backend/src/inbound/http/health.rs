//! `/health/ready` and `/health/live`, driven by the server lifecycle.
//!
//! The process moves one way through [`Phase::Starting`],
//! [`Phase::Serving`] and [`Phase::Draining`]. Readiness holds only while
//! serving; liveness fails once draining begins.
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Phase {
    Starting = 0,
    Serving = 1,
    Draining = 2,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }

    fn accepts_traffic(self) -> bool {
        self == Self::Serving
    }

    fn is_alive(self) -> bool {
        self != Self::Draining
    }
}

/// Lifecycle shared between `main`, the server builder and the handlers.
#[derive(Debug)]
pub struct ServiceStatus {
    phase: AtomicU8,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
        }
    }
}

impl ServiceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Enter [`Phase::Serving`] unless draining has already begun.
    pub fn serving(&self) {
        // A late bind must not revive a draining process.
        let _ = self.phase.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter [`Phase::Draining`]; final.
    pub fn draining(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }
}

fn status_reply(healthy: bool) -> HttpResponse {
    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// 200 while the server is accepting traffic, 503 before and after.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting traffic"),
        (status = 503, description = "Starting up or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(status: web::Data<ServiceStatus>) -> HttpResponse {
    status_reply(status.phase().accepts_traffic())
}

/// 200 until shutdown starts draining the server.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running"),
        (status = 503, description = "Draining")
    )
)]
#[get("/health/live")]
pub async fn live(status: web::Data<ServiceStatus>) -> HttpResponse {
    status_reply(status.phase().is_alive())
}
