//! Estimador de costes de transporte
//!
//! Elige el proveedor activo más barato para un destino y calcula coste y
//! plazo. La distancia la aporta un `DistanceEstimator` inyectable; el
//! cálculo en sí (`quote`) es puro dado un snapshot de proveedores y una
//! distancia.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::TransportationProvider;
use crate::repositories::TransportRepository;
use crate::utils::errors::AppResult;

/// Peso (unidades) a partir del cual se aplica recargo
const FREE_WEIGHT_UNITS: i64 = 5;
/// Recargo por unidad por encima de `FREE_WEIGHT_UNITS`
const SURCHARGE_PER_UNIT: i64 = 10;

const FALLBACK_PROVIDER_NAME: &str = "Standard Delivery";
const FALLBACK_COST: i64 = 50;
const FALLBACK_DAYS: i32 = 3;

/// Distancia en km entre origen y destino
#[async_trait]
pub trait DistanceEstimator: Send + Sync {
    async fn distance_km(&self, origin: &str, destination: &str) -> AppResult<Decimal>;
}

/// Sin geocodificación real: entero uniforme en [5, 50] km
#[derive(Debug, Default, Clone)]
pub struct RandomDistanceEstimator;

#[async_trait]
impl DistanceEstimator for RandomDistanceEstimator {
    async fn distance_km(&self, _origin: &str, _destination: &str) -> AppResult<Decimal> {
        let km: u32 = rand::thread_rng().gen_range(5..=50);
        Ok(Decimal::from(km))
    }
}

/// Distancia constante, para tests y despliegues deterministas
#[derive(Debug, Clone)]
pub struct FixedDistanceEstimator {
    km: Decimal,
}

impl FixedDistanceEstimator {
    pub fn new(km: Decimal) -> Self {
        Self { km }
    }
}

#[async_trait]
impl DistanceEstimator for FixedDistanceEstimator {
    async fn distance_km(&self, _origin: &str, _destination: &str) -> AppResult<Decimal> {
        Ok(self.km)
    }
}

/// Resultado de una cotización
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransportQuote {
    pub provider_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub estimated_days: i32,
    pub provider_name: String,
    #[serde(
        rename = "distance",
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_km: Option<Decimal>,
}

impl TransportQuote {
    /// Cotización usada cuando no hay proveedores activos
    pub fn fallback() -> Self {
        Self {
            provider_id: None,
            cost: Decimal::from(FALLBACK_COST),
            estimated_days: FALLBACK_DAYS,
            provider_name: FALLBACK_PROVIDER_NAME.to_string(),
            distance_km: None,
        }
    }
}

/// Recargo por peso: `(peso - 5) * 10` cuando el peso supera 5 unidades
pub fn weight_surcharge(total_weight: i64) -> Decimal {
    if total_weight > FREE_WEIGHT_UNITS {
        Decimal::from(total_weight - FREE_WEIGHT_UNITS) * Decimal::from(SURCHARGE_PER_UNIT)
    } else {
        Decimal::ZERO
    }
}

/// Cálculo puro de la cotización.
///
/// Los proveedores inactivos se ignoran, igual que aquellos cuyo coste no
/// cabe en un `Decimal`. Con empate de coste gana el primero en el orden
/// recibido (orden de creación en el repositorio).
pub fn quote(
    providers: &[TransportationProvider],
    total_weight: i64,
    distance_km: Decimal,
) -> TransportQuote {
    let surcharge = weight_surcharge(total_weight);
    let cheapest = providers
        .iter()
        .filter(|p| p.active)
        .filter_map(|p| {
            let cost = p
                .distance_cost(distance_km)
                .and_then(|cost| cost.checked_add(surcharge));
            if cost.is_none() {
                warn!("⚠️ Coste del proveedor {} fuera de rango, se ignora", p.id);
            }
            cost.map(|cost| (p, cost))
        })
        .min_by_key(|(_, cost)| *cost);

    let Some((provider, cost)) = cheapest else {
        return TransportQuote::fallback();
    };

    TransportQuote {
        provider_id: Some(provider.id.clone()),
        cost: cost.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        estimated_days: provider.estimated_days,
        provider_name: provider.name.clone(),
        distance_km: Some(distance_km),
    }
}

/// Cotizador con acceso al repositorio y a la estimación de distancia
#[derive(Clone)]
pub struct CostEstimator {
    repository: Arc<dyn TransportRepository>,
    distance: Arc<dyn DistanceEstimator>,
    origin: String,
}

impl CostEstimator {
    pub fn new(
        repository: Arc<dyn TransportRepository>,
        distance: Arc<dyn DistanceEstimator>,
        origin: String,
    ) -> Self {
        Self {
            repository,
            distance,
            origin,
        }
    }

    /// Cotiza el envío de unas líneas (solo importa la cantidad de cada una)
    pub async fn estimate(&self, destination: &str, quantities: &[i32]) -> AppResult<TransportQuote> {
        let providers = self.repository.list_active_providers().await?;
        if providers.is_empty() {
            debug!("📦 Sin proveedores activos, usando tarifa estándar");
            return Ok(TransportQuote::fallback());
        }

        let total_weight: i64 = quantities.iter().map(|q| i64::from(*q)).sum();
        let distance_km = self.distance.distance_km(&self.origin, destination).await?;
        let result = quote(&providers, total_weight, distance_km);

        debug!(
            "🚚 Cotización para '{}': {} ({} km, peso {}) -> {}",
            destination, result.provider_name, distance_km, total_weight, result.cost
        );
        Ok(result)
    }
}
