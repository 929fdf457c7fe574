//! HTTP server implementation
//!
//! hyper http1 with TokioIo, one spawned task per connection. Requests are
//! routed by matching on `(Method, path)`; each request is handled
//! independently with no shared mutable tree state between requests.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::db::{MongoClient, MongoPropertyStore, PropertyStore};
use crate::routes;
use crate::services::{ChecklistService, PropertyService};
use crate::types::Result;

/// Storage-backed services, absent when running without a database
pub struct Services {
    pub properties: PropertyService,
    pub checklist: ChecklistService,
}

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub mongo: Option<MongoClient>,
    services: Option<Services>,
}

impl AppState {
    /// Create AppState without a database (dev mode)
    ///
    /// Storage-backed routes answer 503 until a database is configured.
    pub fn new(args: Args) -> Self {
        Self {
            args,
            mongo: None,
            services: None,
        }
    }

    /// Create AppState backed by MongoDB
    pub async fn with_mongo(args: Args, mongo: MongoClient) -> Result<Self> {
        let store: Arc<dyn PropertyStore> = Arc::new(MongoPropertyStore::new(&mongo).await?);
        Ok(Self {
            args,
            mongo: Some(mongo),
            services: Some(Services {
                properties: PropertyService::new(Arc::clone(&store)),
                checklist: ChecklistService::new(store),
            }),
        })
    }

    pub fn services(&self) -> Option<&Services> {
        self.services.as_ref()
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Homestead listening on {}", state.args.listen);

    if state.services.is_none() {
        warn!("Running without a database - storage routes will answer 503");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move {
                            Ok::<_, hyper::Error>(handle_request(state, addr, req).await)
                        }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    match (method, path.as_str()) {
        (Method::GET, "/") => routes::banner(),

        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        // Database diagnostics
        (Method::GET, "/status") => routes::status_check(Arc::clone(&state)).await,

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        // Properties collection
        (Method::GET, "/api/properties") => {
            routes::handle_list_properties(Arc::clone(&state)).await
        }
        (Method::POST, "/api/properties") => {
            routes::handle_create_property(req, Arc::clone(&state)).await
        }

        // Single property and its checklist
        (method, p) if p.starts_with("/api/properties/") => {
            let rest = p.strip_prefix("/api/properties/").unwrap_or("");

            if let Some(prop_id) = rest
                .strip_suffix("/checklist")
                .filter(|id| !id.is_empty() && !id.contains('/'))
            {
                let prop_id = prop_id.to_string();
                match method {
                    Method::GET => {
                        routes::handle_get_checklist(Arc::clone(&state), &prop_id).await
                    }
                    Method::POST => {
                        routes::handle_add_node(req, Arc::clone(&state), &prop_id).await
                    }
                    Method::PATCH => {
                        routes::handle_update_node(req, Arc::clone(&state), &prop_id).await
                    }
                    Method::DELETE => {
                        routes::handle_delete_node(req, Arc::clone(&state), &prop_id).await
                    }
                    _ => not_found_response(&path),
                }
            } else if !rest.is_empty() && !rest.contains('/') {
                let prop_id = rest.to_string();
                match method {
                    Method::PATCH => {
                        routes::handle_update_property(req, Arc::clone(&state), &prop_id).await
                    }
                    Method::DELETE => {
                        routes::handle_delete_property(Arc::clone(&state), &prop_id).await
                    }
                    _ => not_found_response(&path),
                }
            } else {
                not_found_response(&path)
            }
        }

        _ => not_found_response(&path),
    }
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
