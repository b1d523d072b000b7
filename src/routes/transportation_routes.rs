use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::transportation_dto::{
    ProviderRequest, RouteRequest, RouteStatusRequest, ShipmentUpdateRequest, VehicleRequest,
};
use crate::models::{DeliveryRoute, Shipment, TransportationProvider, Vehicle};
use crate::routes::optional_json;
use crate::services::{RegistryService, RouteService, ShipmentService};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Rutas de administración del transporte (montadas en `/api/admin/transportation`)
pub fn create_transportation_router() -> Router<AppState> {
    Router::new()
        .route("/providers", post(create_provider).get(list_providers))
        .route("/providers/:id", put(update_provider).delete(delete_provider))
        .route("/vehicles", post(create_vehicle).get(list_vehicles))
        .route(
            "/vehicles/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/shipments", get(list_shipments))
        .route("/shipments/:id", put(update_shipment))
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/:id", put(update_route_status))
}

// --- Proveedores ---

async fn create_provider(
    State(state): State<AppState>,
    Json(request): Json<ProviderRequest>,
) -> Result<Json<TransportationProvider>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    let provider = service.create_provider(request).await?;
    Ok(Json(provider))
}

async fn list_providers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransportationProvider>>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    Ok(Json(service.list_providers().await?))
}

async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProviderRequest>,
) -> Result<Json<TransportationProvider>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    let provider = service.update_provider(&id, request).await?;
    Ok(Json(provider))
}

async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    service.deactivate_provider(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Transportation provider deactivated successfully"
    })))
}

// --- Vehículos ---

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    let vehicle = service.create_vehicle(request).await?;
    Ok(Json(vehicle))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    Ok(Json(service.list_vehicles().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    Ok(Json(service.get_vehicle(&id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    let vehicle = service.update_vehicle(&id, request).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = RegistryService::new(state.repository.clone());
    service.deactivate_vehicle(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Vehicle deactivated successfully"
    })))
}

// --- Envíos ---

async fn list_shipments(State(state): State<AppState>) -> Result<Json<Vec<Shipment>>, AppError> {
    let service = ShipmentService::new(state.repository.clone());
    Ok(Json(service.list().await?))
}

async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ShipmentUpdateRequest>,
) -> Result<Json<Shipment>, AppError> {
    let service = ShipmentService::new(state.repository.clone());
    let shipment = service.update_status(&id, request).await?;
    Ok(Json(shipment))
}

// --- Rutas de reparto ---

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<DeliveryRoute>>, AppError> {
    let service = RouteService::new(state.repository.clone());
    Ok(Json(service.list().await?))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<DeliveryRoute>, AppError> {
    let service = RouteService::new(state.repository.clone());
    let route = service.create_route(request).await?;
    Ok(Json(route))
}

/// El estado llega como `?status=` o en el cuerpo `{"status": ...}`
async fn update_route_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RouteStatusRequest>,
    body: Bytes,
) -> Result<Json<DeliveryRoute>, AppError> {
    let status = match query.status {
        Some(status) => status,
        None => optional_json::<RouteStatusRequest>(&body)?
            .and_then(|request| request.status)
            .ok_or_else(|| bad_request_error("status is required"))?,
    };

    let service = RouteService::new(state.repository.clone());
    let route = service.update_route_status(&id, &status).await?;
    Ok(Json(route))
}
