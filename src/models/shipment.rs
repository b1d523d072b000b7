//! Modelo de Shipment
//!
//! Registro de cumplimiento físico de un pedido. El estado sigue un flujo
//! lineal con una rama lateral `returned`:
//!
//! ```text
//! pending → assigned → picked_up → in_transit → out_for_delivery → delivered
//!     └──────────┴───────────┴───────────┴──────────────┴──→ returned
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Estado del envío
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Returned,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 7] = [
        ShipmentStatus::Pending,
        ShipmentStatus::Assigned,
        ShipmentStatus::PickedUp,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Returned,
    ];

    /// Estados desde los que un envío puede agruparse en una ruta
    pub const ASSIGNABLE: [ShipmentStatus; 2] = [ShipmentStatus::Pending, ShipmentStatus::Assigned];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Assigned => "assigned",
            ShipmentStatus::PickedUp => "picked_up",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::OutForDelivery => "out_for_delivery",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Returned => "returned",
        }
    }

    /// Posición en el flujo principal; `returned` queda fuera.
    fn position(self) -> Option<u8> {
        match self {
            ShipmentStatus::Pending => Some(0),
            ShipmentStatus::Assigned => Some(1),
            ShipmentStatus::PickedUp => Some(2),
            ShipmentStatus::InTransit => Some(3),
            ShipmentStatus::OutForDelivery => Some(4),
            ShipmentStatus::Delivered => Some(5),
            ShipmentStatus::Returned => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Returned)
    }

    pub fn is_assignable(self) -> bool {
        Self::ASSIGNABLE.contains(&self)
    }

    /// Solo se avanza (se permiten saltos); `returned` desde cualquier
    /// estado no terminal. Repetir el estado actual solo edita las notas.
    pub fn can_transition_to(self, next: ShipmentStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.position(), next.position()) {
            (_, None) => true,
            (Some(current), Some(target)) => target >= current,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = ShipmentStatus::ALL.iter().map(|s| s.as_str()).collect();
                AppError::BadRequest(format!(
                    "Invalid shipment status '{}'. Must be one of: {}",
                    value,
                    valid.join(", ")
                ))
            })
    }
}

/// Envío asociado 1:1 a un pedido
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    pub id: String,
    pub order_id: String,
    pub provider_id: String,
    pub vehicle_id: Option<String>,
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub estimated_delivery: DateTime<Utc>,
    pub actual_delivery: Option<DateTime<Utc>>,
    pub delivery_notes: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShipmentStatus::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Pending.can_transition_to(Assigned));
        assert!(Assigned.can_transition_to(PickedUp));
        assert!(InTransit.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Delivered));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!InTransit.can_transition_to(Pending));
        assert!(!OutForDelivery.can_transition_to(Assigned));
    }

    #[test]
    fn test_returned_reachable_from_non_terminal_only() {
        for status in [Pending, Assigned, PickedUp, InTransit, OutForDelivery] {
            assert!(status.can_transition_to(Returned), "{} -> returned", status);
        }
        assert!(!Delivered.can_transition_to(Returned));
        assert!(!Returned.can_transition_to(Returned));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for next in ShipmentStatus::ALL {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Returned.can_transition_to(next));
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("out_for_delivery".parse::<ShipmentStatus>().unwrap(), OutForDelivery);
        assert_eq!(PickedUp.to_string(), "picked_up");
        assert!(matches!("lost".parse::<ShipmentStatus>(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(serde_json::to_value(InTransit).unwrap(), "in_transit");
    }
}
