use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::dto::order_dto::{CartCostRequest, OrderStatusRequest, PlaceOrderRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Order;
use crate::routes::optional_json;
use crate::services::{CostPreview, OrderService, OrderShipment, ShipmentService};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Rutas de cliente: pedidos y coste del carrito (requieren token)
pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", post(place_order).get(list_orders))
        .route("/api/orders/:order_id/shipment", get(get_order_shipment))
        .route("/api/cart/transportation-cost", post(cart_transportation_cost))
}

/// Gestión de pedidos para administradores (montada en `/api/admin/orders`)
pub fn create_admin_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_orders))
        .route("/:order_id", put(update_order_status))
}

fn order_service(state: &AppState) -> OrderService {
    OrderService::new(state.repository.clone(), state.cost_estimator())
}

async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let order = order_service(&state)
        .place_order(&user.user_id, &user.email, request)
        .await?;
    Ok(Json(order))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = order_service(&state).list_orders(&user.user_id).await?;
    Ok(Json(orders))
}

async fn get_order_shipment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderShipment>, AppError> {
    let service = ShipmentService::new(state.repository.clone());
    let shipment = service.shipment_for_order(&user.user_id, &order_id).await?;
    Ok(Json(shipment))
}

/// La dirección llega como `?shipping_address=` o en el cuerpo
async fn cart_transportation_cost(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<CartCostRequest>,
    body: Bytes,
) -> Result<Json<CostPreview>, AppError> {
    let shipping_address = match query.shipping_address {
        Some(address) => address,
        None => optional_json::<CartCostRequest>(&body)?
            .and_then(|request| request.shipping_address)
            .ok_or_else(|| bad_request_error("shipping_address is required"))?,
    };

    let preview = order_service(&state)
        .cart_transport_cost(&user.user_id, &shipping_address)
        .await?;
    Ok(Json(preview))
}

async fn list_all_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = order_service(&state).list_all_orders().await?;
    Ok(Json(orders))
}

/// El estado llega como `?status=` o en el cuerpo `{"status": ...}`
async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(query): Query<OrderStatusRequest>,
    body: Bytes,
) -> Result<Json<Order>, AppError> {
    let status = match query.status {
        Some(status) => status,
        None => optional_json::<OrderStatusRequest>(&body)?
            .and_then(|request| request.status)
            .ok_or_else(|| bad_request_error("status is required"))?,
    };

    let order = order_service(&state)
        .update_order_status(&order_id, &status)
        .await?;
    Ok(Json(order))
}
