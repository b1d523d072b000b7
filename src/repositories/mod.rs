//! Repositorios
//!
//! `TransportRepository` es la única puerta al almacenamiento. Hay dos
//! implementaciones: PostgreSQL (sqlx) y memoria (tests y desarrollo local).
//! Las operaciones con cascada se aplican de forma atómica y con
//! compare-and-swap sobre el estado leído al validar; si otro escritor
//! cambió el estado entre medias devuelven `AppError::Conflict`.

pub mod memory_repository;
pub mod pg_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    CartLine, DeliveryRoute, Order, OrderStatus, Product, RouteStatus, Shipment, ShipmentStatus,
    TransportationProvider, Vehicle,
};
use crate::utils::errors::AppResult;

pub use memory_repository::InMemoryTransportRepository;
pub use pg_repository::PgTransportRepository;

/// Cambio de estado de un envío, aplicado solo si el envío sigue en `from`.
#[derive(Debug, Clone)]
pub struct ShipmentTransition {
    pub shipment_id: String,
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
    pub delivery_notes: String,
    /// Solo presente en la transición a `delivered`
    pub actual_delivery: Option<DateTime<Utc>>,
    /// Estado a propagar al pedido en la misma transacción
    pub order_status: Option<OrderStatus>,
}

/// Cambio de estado de una ruta, aplicado solo si la ruta sigue en `from`.
#[derive(Debug, Clone)]
pub struct RouteTransition {
    pub route_id: String,
    pub from: RouteStatus,
    pub to: RouteStatus,
    /// Estado que reciben todos los envíos de la ruta
    pub shipment_status: Option<ShipmentStatus>,
}

#[async_trait]
pub trait TransportRepository: Send + Sync {
    // --- Proveedores ---
    async fn insert_provider(&self, provider: &TransportationProvider) -> AppResult<()>;
    /// Todos los proveedores, en orden de creación
    async fn list_providers(&self) -> AppResult<Vec<TransportationProvider>>;
    /// Proveedores activos, en orden de creación
    async fn list_active_providers(&self) -> AppResult<Vec<TransportationProvider>>;
    async fn find_provider(&self, id: &str) -> AppResult<Option<TransportationProvider>>;
    /// Devuelve `false` si el proveedor no existe
    async fn update_provider(&self, provider: &TransportationProvider) -> AppResult<bool>;
    async fn deactivate_provider(&self, id: &str) -> AppResult<bool>;

    // --- Vehículos ---
    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<()>;
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>>;
    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<bool>;
    async fn deactivate_vehicle(&self, id: &str) -> AppResult<bool>;
    /// Primer vehículo activo del proveedor (sin política de reparto de carga)
    async fn first_active_vehicle(&self, provider_id: &str) -> AppResult<Option<Vehicle>>;

    // --- Envíos ---
    async fn insert_shipment(&self, shipment: &Shipment) -> AppResult<()>;
    /// Más recientes primero
    async fn list_shipments(&self) -> AppResult<Vec<Shipment>>;
    async fn find_shipment(&self, id: &str) -> AppResult<Option<Shipment>>;
    async fn find_shipments(&self, ids: &[String]) -> AppResult<Vec<Shipment>>;
    async fn find_shipment_by_tracking(&self, tracking_number: &str) -> AppResult<Option<Shipment>>;
    async fn find_shipment_by_order(&self, order_id: &str) -> AppResult<Option<Shipment>>;
    async fn tracking_number_exists(&self, tracking_number: &str) -> AppResult<bool>;
    /// `Conflict` si el envío ya no está en `transition.from`
    async fn apply_shipment_transition(&self, transition: &ShipmentTransition) -> AppResult<Shipment>;

    // --- Rutas ---
    /// Inserta la ruta y asigna sus envíos (estado `assigned`, vehicle_id de la
    /// ruta) en una sola transacción. `Conflict` si algún envío dejó de estar
    /// en un estado asignable.
    async fn create_route(&self, route: &DeliveryRoute) -> AppResult<()>;
    /// Fecha más reciente primero
    async fn list_routes(&self) -> AppResult<Vec<DeliveryRoute>>;
    async fn find_route(&self, id: &str) -> AppResult<Option<DeliveryRoute>>;
    /// `Conflict` si la ruta ya no está en `transition.from`
    async fn apply_route_transition(&self, transition: &RouteTransition) -> AppResult<DeliveryRoute>;

    // --- Pedidos ---
    async fn insert_order(&self, order: &Order) -> AppResult<()>;
    async fn find_order(&self, id: &str) -> AppResult<Option<Order>>;
    /// Pedidos del usuario, más recientes primero
    async fn list_orders_for_user(&self, user_id: &str) -> AppResult<Vec<Order>>;
    /// Todos los pedidos, más recientes primero
    async fn list_orders(&self) -> AppResult<Vec<Order>>;
    async fn set_order_status(&self, id: &str, status: OrderStatus) -> AppResult<bool>;

    // --- Catálogo y carrito (lectura) ---
    async fn find_product(&self, id: &str) -> AppResult<Option<Product>>;
    async fn cart_lines(&self, user_id: &str) -> AppResult<Vec<CartLine>>;
    async fn clear_cart(&self, user_id: &str) -> AppResult<()>;
}
