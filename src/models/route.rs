//! Modelo de DeliveryRoute
//!
//! Agrupa envíos bajo un vehículo para una fecha de servicio. El orden de
//! `shipments` es el orden de paradas previsto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Estado de la ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
}

impl RouteStatus {
    pub const ALL: [RouteStatus; 3] = [RouteStatus::Planned, RouteStatus::InProgress, RouteStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "planned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
        }
    }

    fn position(self) -> u8 {
        match self {
            RouteStatus::Planned => 0,
            RouteStatus::InProgress => 1,
            RouteStatus::Completed => 2,
        }
    }

    /// Solo hacia delante; repetir el estado actual es un no-op.
    pub fn can_transition_to(self, next: RouteStatus) -> bool {
        next.position() >= self.position()
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RouteStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid status '{}'. Must be one of: planned, in_progress, completed",
                    value
                ))
            })
    }
}

/// Ruta de reparto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRoute {
    pub id: String,
    pub vehicle_id: String,
    pub date: DateTime<Utc>,
    pub shipments: Vec<String>,
    pub route_status: RouteStatus,
    pub total_distance: f64,
    /// Minutos
    pub estimated_duration: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_transitions() {
        assert!(RouteStatus::Planned.can_transition_to(RouteStatus::InProgress));
        assert!(RouteStatus::Planned.can_transition_to(RouteStatus::Completed));
        assert!(RouteStatus::InProgress.can_transition_to(RouteStatus::Completed));
        assert!(RouteStatus::InProgress.can_transition_to(RouteStatus::InProgress));
        assert!(!RouteStatus::Completed.can_transition_to(RouteStatus::Planned));
        assert!(!RouteStatus::InProgress.can_transition_to(RouteStatus::Planned));
    }

    #[test]
    fn test_invalid_status_lists_valid_set() {
        match "cancelled".parse::<RouteStatus>() {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("planned, in_progress, completed"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
