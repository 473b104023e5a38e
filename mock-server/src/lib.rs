//! In-memory stand-in for the CaseStack REST API.
//!
//! Serves the same resource paths as the real service, enforces Basic auth
//! and the `Accept-Version` header, and answers a few reserved ids with
//! server errors so clients can exercise their failure paths:
//! `err`, `error` and `-1` give 500, `badgateway` and `-2` give 502.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const API_VERSION: &str = "1.0.0";

/// Documents keyed by collection ("carrier", "address", ...) then id.
pub type Db = Arc<RwLock<HashMap<&'static str, HashMap<String, Value>>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/api/carrier/{id}", get(get_carrier).put(save_carrier))
        .route("/api/customer/{id}", get(get_customer).put(save_customer))
        .route("/api/shipment/{id}", get(get_shipment).put(save_shipment))
        .route("/api/shipment/readonly/{id}", put(lock_shipment))
        .route("/api/shipment/status/{id}", put(set_shipment_status))
        .route("/api/address/{id}", get(get_address))
        .route("/api/customfield/{parent}", get(get_custom_fields))
        .layer(middleware::from_fn(require_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn seed() -> HashMap<&'static str, HashMap<String, Value>> {
    let mut db = HashMap::new();
    db.insert(
        "carrier",
        HashMap::from([(
            "foo".to_string(),
            json!({
                "carrier_id": "foo",
                "created": 1_500_000_000,
                "name": "Foo Freight",
                "is_active": true,
                "type": {"ltl": true, "truckload": true},
                "identifiers": {"scac": "FOOF", "fmcsa": {"dot": 1234567}},
                "custom_fields": {"region": "west"}
            }),
        )]),
    );
    db.insert(
        "customer",
        HashMap::from([(
            "foo".to_string(),
            json!({
                "customer_id": "foo",
                "name": "Foo Goods",
                "is_active": true,
                "billing": {"payment_terms": "30", "credit_limit": 50000.0}
            }),
        )]),
    );
    db.insert(
        "shipment",
        HashMap::from([(
            "0".to_string(),
            json!({
                "shipment_id": "0",
                "customer_id": "foo",
                "carrier_id": "foo",
                "status": "Tendered",
                "read_only": false,
                "items": [{"packaging": "Pallet", "qty": 4, "weight": 1800, "class": "70"}],
                "stops": [
                    {"type": "pickup", "city": "Reno", "state": "NV", "items": [0]},
                    {"type": "delivery", "city": "Boise", "state": "ID", "items": [0]}
                ]
            }),
        )]),
    );
    db.insert(
        "address",
        HashMap::from([(
            "foo".to_string(),
            json!({"line1": "1 Dock Rd", "city": "Reno", "state": "NV", "country": "US"}),
        )]),
    );
    let custom_fields = ["carrier", "customer", "shipment"]
        .into_iter()
        .map(|parent| {
            (
                parent.to_string(),
                json!({
                    "_id": format!("cf-{parent}"),
                    "parent": parent,
                    "fields": [
                        {"id": "region", "type": "text", "name": "Region", "default": "", "deleted": false}
                    ]
                }),
            )
        })
        .collect();
    db.insert("customfield", custom_fields);
    db
}

/// Status forced by a reserved failure id.
fn forced_failure(id: &str) -> Option<StatusCode> {
    match id {
        "err" | "error" | "-1" => Some(StatusCode::INTERNAL_SERVER_ERROR),
        "badgateway" | "-2" => Some(StatusCode::BAD_GATEWAY),
        _ => None,
    }
}

async fn require_auth(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|token| STANDARD.decode(token).ok())
        .and_then(|raw| String::from_utf8(raw).ok())
        .is_some_and(|pair| matches!(pair.split_once(':'), Some((user, pass)) if !user.is_empty() && !pass.is_empty()));
    if !authorized {
        debug!(uri = %request.uri(), "Rejecting request without basic auth");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let version = request
        .headers()
        .get("accept-version")
        .and_then(|v| v.to_str().ok());
    if version != Some(API_VERSION) {
        debug!(uri = %request.uri(), ?version, "Rejecting unsupported API version");
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(next.run(request).await)
}

async fn fetch(db: &Db, collection: &'static str, id: &str) -> Result<Json<Value>, StatusCode> {
    if let Some(status) = forced_failure(id) {
        return Err(status);
    }
    let db = db.read().await;
    db.get(collection)
        .and_then(|docs| docs.get(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Replace a document with the body's `{ collection: {...} }` payload.
async fn store(db: &Db, collection: &'static str, id: &str, body: Value) -> StatusCode {
    if let Some(status) = forced_failure(id) {
        return status;
    }
    let Some(document) = body.get(collection).filter(|d| d.is_object()).cloned() else {
        debug!(collection, id, "Rejecting save without envelope");
        return StatusCode::BAD_REQUEST;
    };
    let mut db = db.write().await;
    let docs = db.entry(collection).or_default();
    if !docs.contains_key(id) {
        return StatusCode::NOT_FOUND;
    }
    docs.insert(id.to_string(), document);
    StatusCode::OK
}

/// Apply `edit` to a stored shipment.
async fn update_shipment(db: &Db, id: &str, edit: impl FnOnce(&mut Value)) -> StatusCode {
    if let Some(status) = forced_failure(id) {
        return status;
    }
    let mut db = db.write().await;
    match db.get_mut("shipment").and_then(|docs| docs.get_mut(id)) {
        Some(shipment) => {
            edit(shipment);
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_carrier(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    fetch(&db, "carrier", &id).await
}

async fn save_carrier(State(db): State<Db>, Path(id): Path<String>, Json(body): Json<Value>) -> StatusCode {
    store(&db, "carrier", &id, body).await
}

async fn get_customer(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    fetch(&db, "customer", &id).await
}

async fn save_customer(State(db): State<Db>, Path(id): Path<String>, Json(body): Json<Value>) -> StatusCode {
    store(&db, "customer", &id, body).await
}

async fn get_shipment(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    fetch(&db, "shipment", &id).await
}

async fn save_shipment(State(db): State<Db>, Path(id): Path<String>, Json(body): Json<Value>) -> StatusCode {
    store(&db, "shipment", &id, body).await
}

async fn get_address(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    fetch(&db, "address", &id).await
}

async fn get_custom_fields(
    State(db): State<Db>,
    Path(parent): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if !matches!(parent.as_str(), "carrier" | "customer" | "shipment") {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    fetch(&db, "customfield", &parent).await
}

async fn lock_shipment(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(params): Form<HashMap<String, String>>,
) -> StatusCode {
    let locked = match params.get("readonly").map(String::as_str) {
        Some("true") => true,
        Some("false") => false,
        _ => return StatusCode::BAD_REQUEST,
    };
    update_shipment(&db, &id, |shipment| shipment["read_only"] = json!(locked)).await
}

async fn set_shipment_status(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(params): Form<HashMap<String, String>>,
) -> StatusCode {
    let Some(status) = params.get("status").filter(|s| !s.is_empty()).cloned() else {
        return StatusCode::BAD_REQUEST;
    };
    update_shipment(&db, &id, |shipment| shipment["status"] = json!(status)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_ids_force_failures() {
        assert_eq!(forced_failure("err"), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(forced_failure("-1"), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(forced_failure("badgateway"), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(forced_failure("-2"), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(forced_failure("foo"), None);
    }

    #[test]
    fn seed_has_every_collection() {
        let db = seed();
        for collection in ["carrier", "customer", "shipment", "address", "customfield"] {
            assert!(db.contains_key(collection), "missing {collection}");
        }
        assert_eq!(db["carrier"]["foo"]["carrier_id"], "foo");
        assert_eq!(db["customfield"].len(), 3);
    }

    #[tokio::test]
    async fn store_requires_envelope() {
        let db: Db = Arc::new(RwLock::new(seed()));
        let status = store(&db, "carrier", "foo", json!({"carrier_id": "foo"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let status = store(&db, "carrier", "foo", json!({"carrier": {"carrier_id": "foo"}})).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn store_unknown_id_is_not_found() {
        let db: Db = Arc::new(RwLock::new(seed()));
        let status = store(&db, "customer", "nobody", json!({"customer": {}})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
