//! Health and diagnostics endpoints
//!
//! - `/` — service banner
//! - `/health`, `/healthz` — liveness probe; always 200 while running,
//!   with database status in the body for callers that care
//! - `/status` — database diagnostics (connection, collection names)
//! - `/version` — build information for deployment verification

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::json_response;
use crate::server::AppState;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if service is running)
    pub healthy: bool,
    /// 'online' when the database is reachable, 'degraded' otherwise
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Current timestamp
    pub timestamp: String,
    /// Operating mode
    pub mode: String,
    /// Database connection status
    pub database: DatabaseHealth,
}

/// Database connection details
#[derive(Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Service banner for GET /
pub fn banner() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        serde_json::json!({ "message": "Loved Homes backend running" }),
    )
}

/// Handle liveness probe (/health, /healthz)
pub fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let connected = state.mongo.is_some();

    let response = HealthResponse {
        healthy: true,
        status: if connected { "online" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: if state.args.dev_mode {
            "development".to_string()
        } else {
            "production".to_string()
        },
        database: DatabaseHealth {
            connected,
            name: state.mongo.as_ref().map(|m| m.db_name().to_string()),
        },
    };

    json_response(StatusCode::OK, response)
}

/// Database diagnostics for GET /status
#[derive(Serialize)]
pub struct StatusResponse {
    pub backend: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// Handle GET /status
pub async fn status_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = match &state.mongo {
        Some(mongo) => match mongo.collection_names().await {
            Ok(mut collections) => {
                collections.truncate(10);
                StatusResponse {
                    backend: "running",
                    database: "connected",
                    database_name: Some(mongo.db_name().to_string()),
                    connection_status: "connected",
                    collections,
                }
            }
            Err(_) => StatusResponse {
                backend: "running",
                database: "error",
                database_name: Some(mongo.db_name().to_string()),
                connection_status: "unreachable",
                collections: Vec::new(),
            },
        },
        None => StatusResponse {
            backend: "running",
            database: "not available",
            database_name: None,
            connection_status: "not connected",
            collections: Vec::new(),
        },
    };

    json_response(StatusCode::OK, response)
}

/// Version information for deployment verification
#[derive(Serialize)]
pub struct VersionResponse {
    /// Cargo package version
    pub version: &'static str,
    /// Git commit hash (short)
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Handle version endpoint (/version)
pub fn version_info() -> Response<Full<Bytes>> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "homestead",
    };

    json_response(StatusCode::OK, response)
}
