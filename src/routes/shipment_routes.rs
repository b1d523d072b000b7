use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::services::{ShipmentService, TrackingDetails};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Tracking público (montado en `/api/shipments`)
pub fn create_shipment_router() -> Router<AppState> {
    Router::new().route("/track/:tracking_number", get(track_shipment))
}

async fn track_shipment(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackingDetails>, AppError> {
    let service = ShipmentService::new(state.repository.clone());
    let details = service.track(&tracking_number).await?;
    Ok(Json(details))
}
