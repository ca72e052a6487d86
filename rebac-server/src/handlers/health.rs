use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::RebacServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub relationships: String,
}

/// `GET /health`
pub async fn health_check(State(server): State<RebacServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: server.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        relationships: format!("{} loaded", server.engine.store().len()),
    })
}
