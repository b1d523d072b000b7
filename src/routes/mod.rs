//! Router HTTP
//!
//! Monta las rutas públicas, las de cliente (token requerido) y las de
//! administración (token con rol admin), más las capas de trazas, timeout
//! y CORS.

pub mod order_routes;
pub mod shipment_routes;
pub mod transportation_routes;

use axum::{
    body::Bytes,
    middleware::{from_fn, from_fn_with_state},
    response::Json,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{admin_only_middleware, auth_middleware, cors_layer};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = transportation_routes::create_transportation_router()
        .route_layer(from_fn(admin_only_middleware))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let admin_order_routes = order_routes::create_admin_order_router()
        .route_layer(from_fn(admin_only_middleware))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let customer_routes = order_routes::create_order_router()
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/admin/transportation", admin_routes)
        .nest("/api/admin/orders", admin_order_routes)
        .nest("/api/shipments", shipment_routes::create_shipment_router())
        .merge(customer_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_secs)))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

/// Health check
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "shophub-transportation",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Cuerpo JSON opcional: vacío -> `None`
pub(crate) fn optional_json<T: DeserializeOwned>(body: &Bytes) -> AppResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::transportation_dto::RouteStatusRequest;

    #[test]
    fn test_optional_json() {
        let empty: Option<RouteStatusRequest> = optional_json(&Bytes::from_static(b"  ")).unwrap();
        assert!(empty.is_none());

        let parsed: Option<RouteStatusRequest> =
            optional_json(&Bytes::from_static(br#"{"status":"in_progress"}"#)).unwrap();
        assert_eq!(parsed.and_then(|r| r.status).as_deref(), Some("in_progress"));

        let broken = optional_json::<RouteStatusRequest>(&Bytes::from_static(b"{status"));
        assert!(matches!(broken, Err(AppError::BadRequest(_))));
    }
}
