//! ShopHub - backend de transporte
//!
//! Selección de proveedor y coste de envío, ciclo de vida de los envíos,
//! rutas de reparto y registro de proveedores y vehículos.

pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
