//! Property CRUD routes
//!
//! ## Endpoints
//!
//! - `GET /api/properties` — list all properties
//! - `POST /api/properties` — create a property
//! - `PATCH /api/properties/{id}` — update name/photo fields
//! - `DELETE /api/properties/{id}` — delete a property

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::checklist::ChecklistNode;
use crate::db::schemas::PropertyDoc;
use crate::routes::{db_unavailable_response, error_response, json_response};
use crate::server::AppState;
use crate::services::PropertyPatch;

/// Request body for POST /api/properties
#[derive(Debug, Deserialize)]
pub struct PropertyCreate {
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Request body for PATCH /api/properties/{id}
#[derive(Debug, Deserialize, Default)]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Public form of a property, with the store key rendered as a string
#[derive(Debug, Serialize)]
pub struct PublicProperty {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub checklist: Vec<ChecklistNode>,
}

impl From<PropertyDoc> for PublicProperty {
    fn from(doc: PropertyDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            name: doc.name,
            photo_url: doc.photo_url,
            checklist: doc.checklist,
        }
    }
}

/// Handle GET /api/properties
pub async fn handle_list_properties(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    match services.properties.list().await {
        Ok(all) => {
            let public: Vec<PublicProperty> = all.into_iter().map(PublicProperty::from).collect();
            json_response(StatusCode::OK, public)
        }
        Err(e) => error_response(&e),
    }
}

/// Handle POST /api/properties
pub async fn handle_create_property(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": format!("Failed to read request body: {}", e) }),
            );
        }
    };

    let payload: PropertyCreate = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": format!("Invalid JSON: {}", e) }),
            );
        }
    };

    match services
        .properties
        .create(payload.name, payload.photo_url)
        .await
    {
        Ok(id) => json_response(StatusCode::OK, serde_json::json!({ "id": id })),
        Err(e) => error_response(&e),
    }
}

/// Handle PATCH /api/properties/{id}
pub async fn handle_update_property(
    req: Request<Incoming>,
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": format!("Failed to read request body: {}", e) }),
            );
        }
    };

    let payload: PropertyUpdate = if body.is_empty() {
        PropertyUpdate::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(p) => p,
            Err(e) => {
                return json_response(
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({ "error": format!("Invalid JSON: {}", e) }),
                );
            }
        }
    };

    let patch = PropertyPatch {
        name: payload.name,
        photo_url: payload.photo_url,
    };

    match services.properties.update(property_id, patch).await {
        Ok(updated) => json_response(StatusCode::OK, serde_json::json!({ "updated": updated })),
        Err(e) => error_response(&e),
    }
}

/// Handle DELETE /api/properties/{id}
pub async fn handle_delete_property(
    state: Arc<AppState>,
    property_id: &str,
) -> Response<Full<Bytes>> {
    let Some(services) = state.services() else {
        return db_unavailable_response();
    };

    match services.properties.remove(property_id).await {
        Ok(deleted) => json_response(StatusCode::OK, serde_json::json!({ "deleted": deleted })),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_property_renders_id_as_hex() {
        let mut doc = PropertyDoc::new("Cabin".to_string(), None);
        let id = bson::oid::ObjectId::new();
        doc._id = Some(id);

        let public = PublicProperty::from(doc);
        assert_eq!(public.id, id.to_hex());
        assert!(public.checklist.is_empty());
    }

    #[test]
    fn test_property_create_photo_defaults_to_none() {
        let payload: PropertyCreate = serde_json::from_str(r#"{"name": "Cabin"}"#).unwrap();
        assert!(payload.photo_url.is_none());
    }
}
