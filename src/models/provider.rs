//! Modelo de TransportationProvider
//!
//! Un proveedor ofrece servicio de entrega con una estructura de costes
//! (coste base + coste por km). Nunca se borra físicamente: `active = false`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Proveedor de transporte
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportationProvider {
    pub id: String,
    pub name: String,
    /// standard | express | overnight | economy | local (abierto en la práctica)
    pub service_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_per_km: Decimal,
    pub estimated_days: i32,
    pub service_areas: Vec<String>,
    pub active: bool,
}

impl TransportationProvider {
    /// Coste del trayecto antes del recargo por peso; `None` si desborda
    pub fn distance_cost(&self, distance_km: Decimal) -> Option<Decimal> {
        self.cost_per_km
            .checked_mul(distance_km)?
            .checked_add(self.base_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_cost() {
        let provider = TransportationProvider {
            id: "p-1".to_string(),
            name: "SwiftDelivery Express".to_string(),
            service_type: "express".to_string(),
            base_cost: Decimal::from(80),
            cost_per_km: Decimal::new(25, 1),
            estimated_days: 1,
            service_areas: vec!["Delhi".to_string()],
            active: true,
        };
        assert_eq!(provider.distance_cost(Decimal::from(20)), Some(Decimal::from(130)));
    }

    #[test]
    fn test_distance_cost_overflow() {
        let provider = TransportationProvider {
            id: "p-2".to_string(),
            name: "Runaway Rates".to_string(),
            service_type: "express".to_string(),
            base_cost: Decimal::ZERO,
            cost_per_km: Decimal::MAX / Decimal::from(10),
            estimated_days: 1,
            service_areas: vec![],
            active: true,
        };
        assert_eq!(provider.distance_cost(Decimal::from(50)), None);
    }

    #[test]
    fn test_money_serializes_as_number() {
        let provider = TransportationProvider {
            id: "p-1".to_string(),
            name: "EconoShip".to_string(),
            service_type: "economy".to_string(),
            base_cost: Decimal::from(25),
            cost_per_km: Decimal::new(10, 1),
            estimated_days: 5,
            service_areas: vec![],
            active: true,
        };
        let json = serde_json::to_value(&provider).unwrap();
        assert!(json["base_cost"].is_number());
        assert_eq!(json["cost_per_km"].as_f64(), Some(1.0));
    }
}
