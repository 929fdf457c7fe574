//! HTTP routes for Homestead

pub mod checklist;
pub mod health;
pub mod properties;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::types::HomesteadError;

pub use checklist::{
    handle_add_node, handle_delete_node, handle_get_checklist, handle_update_node,
};
pub use health::{banner, health_check, status_check, version_info};
pub use properties::{
    handle_create_property, handle_delete_property, handle_list_properties,
    handle_update_property,
};

/// Build a JSON response with the standard headers
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response<Full<Bytes>> {
    match serde_json::to_string(&body) {
        Ok(json) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(Full::new(Bytes::from(json)))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::from("Failed to build response")))
                    .unwrap()
            }),
        Err(_) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::new(Bytes::from("Failed to serialize response")))
            .unwrap(),
    }
}

/// Map a service error onto a JSON error response
pub(crate) fn error_response(err: &HomesteadError) -> Response<Full<Bytes>> {
    let status = match err {
        HomesteadError::InvalidIdentifier(_)
        | HomesteadError::InvalidPath(_)
        | HomesteadError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
        HomesteadError::PropertyNotFound(_) => StatusCode::NOT_FOUND,
        HomesteadError::Database(_) | HomesteadError::Internal(_) => {
            warn!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_response(status, serde_json::json!({ "error": err.to_string() }))
}

/// Storage-backed route hit while running without a database
pub(crate) fn db_unavailable_response() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::SERVICE_UNAVAILABLE,
        serde_json::json!({ "error": "Database not available" }),
    )
}

/// Parse query string into key-value map
pub(crate) fn parse_query_params(query: &str) -> HashMap<String, String> {
    if query.is_empty() {
        return HashMap::new();
    }

    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let params = parse_query_params("path=0,1&foo=bar");
        assert_eq!(params.get("path"), Some(&"0,1".to_string()));
        assert_eq!(params.get("foo"), Some(&"bar".to_string()));
    }

    #[test]
    fn test_parse_query_params_empty() {
        assert!(parse_query_params("").is_empty());
    }

    #[test]
    fn test_error_statuses() {
        let not_found = error_response(&HomesteadError::PropertyNotFound("x".into()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let out_of_range = error_response(&HomesteadError::OutOfRange { index: 5, len: 2 });
        assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);

        let bad_id = error_response(&HomesteadError::InvalidIdentifier("zzz".into()));
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

        let db = error_response(&HomesteadError::Database("down".into()));
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
