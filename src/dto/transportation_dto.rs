use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_money, validate_non_negative_f64, validate_not_empty};

// Request para crear o actualizar un proveedor (reemplazo completo salvo `active`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProviderRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub service_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_money")]
    pub base_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_money")]
    pub cost_per_km: Decimal,
    #[validate(range(min = 0))]
    pub estimated_days: i32,
    #[serde(default)]
    pub service_areas: Vec<String>,
}

// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub provider_id: String,
    #[validate(custom = "validate_not_empty")]
    pub vehicle_number: String,
    #[validate(custom = "validate_not_empty")]
    pub driver_name: String,
    /// truck | van | bike
    pub vehicle_type: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(default)]
    pub current_location: String,
}

// Request de cambio de estado de un envío
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub delivery_notes: String,
}

// Request para crear una ruta de reparto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteRequest {
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: String,
    pub date: DateTime<Utc>,
    pub shipments: Vec<String>,
    #[validate(custom = "validate_non_negative_f64")]
    pub total_distance: f64,
    /// Minutos
    #[validate(range(min = 0))]
    pub estimated_duration: i32,
}

// Estado de ruta, por query (`?status=`) o en el cuerpo
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStatusRequest {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_request_accepts_numbers() {
        let request: ProviderRequest = serde_json::from_value(serde_json::json!({
            "name": "EconoShip",
            "service_type": "economy",
            "base_cost": 25,
            "cost_per_km": 1.5,
            "estimated_days": 5,
            "service_areas": ["All India"]
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.base_cost, Decimal::from(25));
        assert_eq!(request.cost_per_km, Decimal::new(15, 1));
    }

    #[test]
    fn test_provider_request_rejects_negative_money_and_blank_name() {
        let request: ProviderRequest = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "service_type": "economy",
            "base_cost": -1,
            "cost_per_km": 1,
            "estimated_days": -2
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("base_cost"));
        assert!(fields.contains_key("estimated_days"));
        assert!(!fields.contains_key("cost_per_km"));
    }

    #[test]
    fn test_route_request_rejects_negative_distance() {
        let request: RouteRequest = serde_json::from_value(serde_json::json!({
            "vehicle_id": "v-1",
            "date": "2025-03-01T08:00:00Z",
            "shipments": ["s-1"],
            "total_distance": -4.0,
            "estimated_duration": 30
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_shipment_update_notes_default_to_empty() {
        let request: ShipmentUpdateRequest =
            serde_json::from_value(serde_json::json!({ "status": "assigned" })).unwrap();
        assert_eq!(request.delivery_notes, "");
    }
}
