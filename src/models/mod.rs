//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del módulo de transporte.
//! Todos usan identificadores opacos en texto, independientes del motor
//! de almacenamiento.

pub mod catalog;
pub mod order;
pub mod provider;
pub mod route;
pub mod shipment;
pub mod vehicle;

pub use catalog::{CartLine, Product};
pub use order::{Order, OrderItem, OrderStatus};
pub use provider::TransportationProvider;
pub use route::{DeliveryRoute, RouteStatus};
pub use shipment::{Shipment, ShipmentStatus};
pub use vehicle::{Vehicle, VehicleType};

/// Nuevo identificador opaco
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
