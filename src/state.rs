//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El almacenamiento y la estimación de
//! distancia se inyectan como trait objects.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::TransportRepository;
use crate::services::cost_estimator::{CostEstimator, DistanceEstimator};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TransportRepository>,
    pub config: EnvironmentConfig,
    pub distance: Arc<dyn DistanceEstimator>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn TransportRepository>,
        config: EnvironmentConfig,
        distance: Arc<dyn DistanceEstimator>,
    ) -> Self {
        Self {
            repository,
            config,
            distance,
        }
    }

    /// Cotizador con el origen configurado (almacén central)
    pub fn cost_estimator(&self) -> CostEstimator {
        CostEstimator::new(
            self.repository.clone(),
            self.distance.clone(),
            self.config.warehouse_origin.clone(),
        )
    }
}
