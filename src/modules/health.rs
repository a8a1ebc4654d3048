use actix_web::{get, web};
use serde::Serialize;

use crate::api::{error, success};
use crate::modules::file::service::FileService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness / readiness probe. Round-trips `SELECT 1` through the pool.
#[get("/health")]
pub async fn health_check(
    file_service: web::Data<FileService>,
) -> Result<success::Success<HealthResponse>, error::Error> {
    if let Err(e) = file_service.check_health().await {
        log::warn!("Health check failed: {}", e);
        return Err(error::Error::service_unavailable("database unavailable"));
    }
    Ok(success::Success::ok(HealthResponse { status: "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}
