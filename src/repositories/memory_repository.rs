//! Repositorio en memoria
//!
//! Todo el estado vive detrás de un único `RwLock`, así que cada operación
//! (incluidas las cascadas) es atómica frente a otros escritores.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{RouteTransition, ShipmentTransition, TransportRepository};
use crate::models::{
    CartLine, DeliveryRoute, Order, OrderStatus, Product, ShipmentStatus, Shipment,
    TransportationProvider, Vehicle,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Default)]
struct MemoryState {
    providers: Vec<TransportationProvider>,
    vehicles: Vec<Vehicle>,
    shipments: Vec<Shipment>,
    routes: Vec<DeliveryRoute>,
    orders: Vec<Order>,
    products: Vec<Product>,
    cart: Vec<CartLine>,
}

/// Repositorio en memoria, clonable y compartible entre tareas
#[derive(Clone, Default)]
pub struct InMemoryTransportRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryTransportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alta de producto (el catálogo real vive en otro servicio)
    pub async fn seed_product(&self, product: Product) {
        let mut state = self.state.write().await;
        state.products.retain(|p| p.id != product.id);
        state.products.push(product);
    }

    /// Añadir al carrito sumando la cantidad si la línea ya existe
    pub async fn seed_cart_line(&self, line: CartLine) {
        let mut state = self.state.write().await;
        match state
            .cart
            .iter_mut()
            .find(|l| l.user_id == line.user_id && l.product_id == line.product_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => state.cart.push(line),
        }
    }
}

#[async_trait]
impl TransportRepository for InMemoryTransportRepository {
    async fn insert_provider(&self, provider: &TransportationProvider) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.providers.iter().any(|p| p.id == provider.id) {
            return Err(AppError::Conflict(format!("Provider '{}' already exists", provider.id)));
        }
        state.providers.push(provider.clone());
        Ok(())
    }

    async fn list_providers(&self) -> AppResult<Vec<TransportationProvider>> {
        Ok(self.state.read().await.providers.clone())
    }

    async fn list_active_providers(&self) -> AppResult<Vec<TransportationProvider>> {
        let state = self.state.read().await;
        Ok(state.providers.iter().filter(|p| p.active).cloned().collect())
    }

    async fn find_provider(&self, id: &str) -> AppResult<Option<TransportationProvider>> {
        let state = self.state.read().await;
        Ok(state.providers.iter().find(|p| p.id == id).cloned())
    }

    async fn update_provider(&self, provider: &TransportationProvider) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.providers.iter_mut().find(|p| p.id == provider.id) {
            Some(existing) => {
                *existing = provider.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_provider(&self, id: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.providers.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                existing.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(AppError::Conflict(format!("Vehicle '{}' already exists", vehicle.id)));
        }
        state.vehicles.push(vehicle.clone());
        Ok(())
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.state.read().await.vehicles.clone())
    }

    async fn find_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let state = self.state.read().await;
        Ok(state.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => {
                *existing = vehicle.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_vehicle(&self, id: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.vehicles.iter_mut().find(|v| v.id == id) {
            Some(existing) => {
                existing.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn first_active_vehicle(&self, provider_id: &str) -> AppResult<Option<Vehicle>> {
        let state = self.state.read().await;
        Ok(state
            .vehicles
            .iter()
            .find(|v| v.provider_id == provider_id && v.active)
            .cloned())
    }

    async fn insert_shipment(&self, shipment: &Shipment) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state
            .shipments
            .iter()
            .any(|s| s.tracking_number == shipment.tracking_number)
        {
            return Err(AppError::Conflict(format!(
                "Tracking number '{}' already in use",
                shipment.tracking_number
            )));
        }
        if state.shipments.iter().any(|s| s.order_id == shipment.order_id) {
            return Err(AppError::Conflict(format!(
                "Order '{}' already has a shipment",
                shipment.order_id
            )));
        }
        state.shipments.push(shipment.clone());
        Ok(())
    }

    async fn list_shipments(&self) -> AppResult<Vec<Shipment>> {
        let state = self.state.read().await;
        let mut shipments: Vec<Shipment> = state.shipments.iter().rev().cloned().collect();
        shipments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(shipments)
    }

    async fn find_shipment(&self, id: &str) -> AppResult<Option<Shipment>> {
        let state = self.state.read().await;
        Ok(state.shipments.iter().find(|s| s.id == id).cloned())
    }

    async fn find_shipments(&self, ids: &[String]) -> AppResult<Vec<Shipment>> {
        let state = self.state.read().await;
        Ok(state
            .shipments
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_shipment_by_tracking(&self, tracking_number: &str) -> AppResult<Option<Shipment>> {
        let state = self.state.read().await;
        Ok(state
            .shipments
            .iter()
            .find(|s| s.tracking_number == tracking_number)
            .cloned())
    }

    async fn find_shipment_by_order(&self, order_id: &str) -> AppResult<Option<Shipment>> {
        let state = self.state.read().await;
        Ok(state.shipments.iter().find(|s| s.order_id == order_id).cloned())
    }

    async fn tracking_number_exists(&self, tracking_number: &str) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .shipments
            .iter()
            .any(|s| s.tracking_number == tracking_number))
    }

    async fn apply_shipment_transition(&self, transition: &ShipmentTransition) -> AppResult<Shipment> {
        let mut state = self.state.write().await;

        let shipment = state
            .shipments
            .iter_mut()
            .find(|s| s.id == transition.shipment_id)
            .ok_or_else(|| not_found_error("Shipment", &transition.shipment_id))?;

        if shipment.status != transition.from {
            return Err(AppError::Conflict(format!(
                "Shipment '{}' changed status concurrently (expected '{}', found '{}')",
                shipment.id, transition.from, shipment.status
            )));
        }

        shipment.status = transition.to;
        shipment.delivery_notes = transition.delivery_notes.clone();
        if transition.actual_delivery.is_some() {
            shipment.actual_delivery = transition.actual_delivery;
        }
        let updated = shipment.clone();

        if let Some(order_status) = transition.order_status {
            if let Some(order) = state.orders.iter_mut().find(|o| o.id == updated.order_id) {
                order.status = order_status;
            }
        }

        Ok(updated)
    }

    async fn create_route(&self, route: &DeliveryRoute) -> AppResult<()> {
        let mut state = self.state.write().await;

        let wanted: HashSet<&String> = route.shipments.iter().collect();
        let eligible = state
            .shipments
            .iter()
            .filter(|s| wanted.contains(&s.id) && s.status.is_assignable())
            .count();
        if eligible != wanted.len() {
            return Err(AppError::Conflict(
                "One or more shipments are no longer available for routing".to_string(),
            ));
        }

        for shipment in state.shipments.iter_mut().filter(|s| wanted.contains(&s.id)) {
            shipment.status = ShipmentStatus::Assigned;
            shipment.vehicle_id = Some(route.vehicle_id.clone());
        }
        state.routes.push(route.clone());
        Ok(())
    }

    async fn list_routes(&self) -> AppResult<Vec<DeliveryRoute>> {
        let state = self.state.read().await;
        let mut routes = state.routes.clone();
        routes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(routes)
    }

    async fn find_route(&self, id: &str) -> AppResult<Option<DeliveryRoute>> {
        let state = self.state.read().await;
        Ok(state.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn apply_route_transition(&self, transition: &RouteTransition) -> AppResult<DeliveryRoute> {
        let mut state = self.state.write().await;

        let route = state
            .routes
            .iter_mut()
            .find(|r| r.id == transition.route_id)
            .ok_or_else(|| not_found_error("Delivery route", &transition.route_id))?;

        if route.route_status != transition.from {
            return Err(AppError::Conflict(format!(
                "Delivery route '{}' changed status concurrently (expected '{}', found '{}')",
                route.id, transition.from, route.route_status
            )));
        }

        route.route_status = transition.to;
        let updated = route.clone();

        if let Some(status) = transition.shipment_status {
            for shipment in state
                .shipments
                .iter_mut()
                .filter(|s| updated.shipments.contains(&s.id))
            {
                shipment.status = status;
            }
        }

        Ok(updated)
    }

    async fn insert_order(&self, order: &Order) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.orders.iter().any(|o| o.id == order.id) {
            return Err(AppError::Conflict(format!("Order '{}' already exists", order.id)));
        }
        state.orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: &str) -> AppResult<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state.orders.iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_product(&self, id: &str) -> AppResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn cart_lines(&self, user_id: &str) -> AppResult<Vec<CartLine>> {
        let state = self.state.read().await;
        Ok(state
            .cart
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn clear_cart(&self, user_id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.cart.retain(|l| l.user_id != user_id);
        Ok(())
    }
}
