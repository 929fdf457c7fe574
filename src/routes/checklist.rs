//! Checklist tree routes
//!
//! ## Endpoints
//!
//! - `GET /api/properties/{id}/checklist` — read the whole tree
//! - `POST /api/properties/{id}/checklist` — add a node under `parent_path`
//! - `PATCH /api/properties/{id}/checklist?path=0,1` — update title/kind
//! - `DELETE /api/properties/{id}/checklist?path=0,1` — remove a node
//!
//! Paths are positional and ephemeral: an insert or delete shifts the
//! indices of every following sibling, so clients re-fetch the tree for
//! fresh paths after each mutation.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::checklist::{ChecklistNode, KindTag, NodeChanges, NodePath};
use crate::routes::{db_unavailable_response, error_response, json_response, parse_query_params};
use crate::server::AppState;
use crate::types::Result;

/// Request body for POST
#[derive(Debug, Deserialize)]
pub struct NodeCreate {
    pub title: String,
    /// "item" or "folder"; anything else is treated as an item
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Path of indices to reach the parent (e.g. [0, 2]); empty for root
    #[serde(default)]
    pub parent_path: NodePath,
}

fn default_kind() -> String {
    "item".to_string()
}

/// Request body for PATCH; absent fields are left alone
#[derive(Debug, Deserialize, Default)]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddedResponse {
    added: bool,
    node: ChecklistNode,
}

#[derive(Debug, Serialize)]
struct UpdatedResponse {
    updated: bool,
    node: ChecklistNode,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: bool,
    removed: ChecklistNode,
}

/// Handle GET /api/properties/{id}/checklist
pub async fn handle_get_checklist(
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    match services.checklist.get(property_id).await {
        Ok(tree) => json_response(StatusCode::OK, tree),
        Err(e) => error_response(&e),
    }
}

/// Handle POST /api/properties/{id}/checklist
pub async fn handle_add_node(
    req: Request<Incoming>,
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    let payload: NodeCreate = match read_json_body(req).await {
        Ok(p) => p,
        Err(response) => return *response,
    };

    match services
        .checklist
        .add(property_id, &payload.parent_path, payload.title, &payload.kind)
        .await
    {
        Ok(node) => json_response(StatusCode::OK, AddedResponse { added: true, node }),
        Err(e) => error_response(&e),
    }
}

/// Handle PATCH /api/properties/{id}/checklist?path=0,1
pub async fn handle_update_node(
    req: Request<Incoming>,
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    let path = match path_from_query(req.uri().query()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    // An absent body means "no field changes"
    let payload: NodeUpdate = match read_optional_json_body(req).await {
        Ok(p) => p,
        Err(response) => return *response,
    };

    let changes = NodeChanges {
        title: payload.title,
        // invalid kind strings are ignored, not rejected
        kind: payload.kind.as_deref().and_then(KindTag::parse),
    };

    match services.checklist.update(property_id, &path, changes).await {
        Ok(node) => json_response(
            StatusCode::OK,
            UpdatedResponse {
                updated: true,
                node,
            },
        ),
        Err(e) => error_response(&e),
    }
}

/// Handle DELETE /api/properties/{id}/checklist?path=0,1
pub async fn handle_delete_node(
    req: Request<Incoming>,
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    let path = match path_from_query(req.uri().query()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    match services.checklist.remove(property_id, &path).await {
        Ok(removed) => json_response(
            StatusCode::OK,
            DeletedResponse {
                deleted: true,
                removed,
            },
        ),
        Err(e) => error_response(&e),
    }
}

/// Extract the `path` query parameter (absent encodes the root)
fn path_from_query(query: Option<&str>) -> Result<NodePath> {
    let params = parse_query_params(query.unwrap_or(""));
    match params.get("path") {
        Some(raw) => {
            let decoded = urlencoding::decode(raw)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.clone());
            NodePath::parse(&decoded)
        }
        None => Ok(NodePath::default()),
    }
}

/// Read and parse a required JSON body
async fn read_json_body<T: serde::de::DeserializeOwned>(
    req: Request<Incoming>,
) -> std::result::Result<T, Box<Response<Full<Bytes>>>> {
    let body = req.collect().await.map_err(|e| {
        Box::new(json_response(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": format!("Failed to read request body: {}", e) }),
        ))
    })?;

    serde_json::from_slice(&body.to_bytes()).map_err(|e| {
        Box::new(json_response(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": format!("Invalid JSON: {}", e) }),
        ))
    })
}

/// Like `read_json_body`, but an empty body yields the default
async fn read_optional_json_body<T: serde::de::DeserializeOwned + Default>(
    req: Request<Incoming>,
) -> std::result::Result<T, Box<Response<Full<Bytes>>>> {
    let body = req.collect().await.map_err(|e| {
        Box::new(json_response(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": format!("Failed to read request body: {}", e) }),
        ))
    })?;

    let bytes = body.to_bytes();
    if bytes.is_empty() {
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        Box::new(json_response(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": format!("Invalid JSON: {}", e) }),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_create_defaults() {
        let payload: NodeCreate = serde_json::from_str(r#"{"title": "Mow lawn"}"#).unwrap();
        assert_eq!(payload.kind, "item");
        assert!(payload.parent_path.is_empty());
    }

    #[test]
    fn test_node_create_parent_path_as_array() {
        let payload: NodeCreate =
            serde_json::from_str(r#"{"title": "x", "parent_path": [0, 2]}"#).unwrap();
        assert_eq!(payload.parent_path.indices(), &[0, 2]);
    }

    #[test]
    fn test_node_create_parent_path_as_string() {
        let payload: NodeCreate =
            serde_json::from_str(r#"{"title": "x", "parent_path": "0,2"}"#).unwrap();
        assert_eq!(payload.parent_path.indices(), &[0, 2]);
    }

    #[test]
    fn test_path_from_query() {
        assert_eq!(
            path_from_query(Some("path=0,1")).unwrap().indices(),
            &[0, 1]
        );
        assert_eq!(
            path_from_query(Some("path=0%2C1")).unwrap().indices(),
            &[0, 1]
        );
        assert!(path_from_query(Some("path=")).unwrap().is_empty());
        assert!(path_from_query(None).unwrap().is_empty());
    }

    #[test]
    fn test_path_from_query_rejects_garbage() {
        assert!(path_from_query(Some("path=0,x")).is_err());
    }
}
