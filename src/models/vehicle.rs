//! Modelo de Vehicle
//!
//! Un vehículo pertenece a exactamente un proveedor y se desactiva en lugar
//! de borrarse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Truck,
    Van,
    Bike,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Truck => "truck",
            VehicleType::Van => "van",
            VehicleType::Bike => "bike",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "truck" => Ok(VehicleType::Truck),
            "van" => Ok(VehicleType::Van),
            "bike" => Ok(VehicleType::Bike),
            other => Err(AppError::BadRequest(format!(
                "Invalid vehicle type '{}'. Must be one of: truck, van, bike",
                other
            ))),
        }
    }
}

/// Vehículo de un proveedor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub provider_id: String,
    pub vehicle_number: String,
    pub driver_name: String,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub current_location: String,
    pub active: bool,
}
