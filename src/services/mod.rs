//! Services module
//!
//! Este módulo contiene la lógica de negocio del módulo de transporte.
//! Cada servicio recibe el repositorio como dependencia explícita.

pub mod cost_estimator;
pub mod order_service;
pub mod registry_service;
pub mod route_service;
pub mod shipment_service;
pub mod tracking;

pub use cost_estimator::{
    CostEstimator, DistanceEstimator, FixedDistanceEstimator, RandomDistanceEstimator, TransportQuote,
};
pub use order_service::{CostPreview, OrderService};
pub use registry_service::RegistryService;
pub use route_service::RouteService;
pub use shipment_service::{OrderShipment, ShipmentService, TrackingDetails};
