//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los DTOs (`#[validate(custom = ...)]`) y los servicios.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    static ref TRACKING_NUMBER_RE: Regex = Regex::new(r"^TRK[A-Z0-9]{8}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Tope para tarifas de proveedor (base_cost, cost_per_km)
pub const MAX_MONEY: i64 = 1_000_000_000;

/// Validar importes monetarios: no negativos y como mucho `MAX_MONEY`
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)?;
    if *value > Decimal::from(MAX_MONEY) {
        let mut error = ValidationError::new("max_money");
        error.add_param("value".into(), value);
        error.add_param("max".into(), &MAX_MONEY);
        return Err(error);
    }
    Ok(())
}

/// Validar distancias y duraciones suministradas externamente
pub fn validate_non_negative_f64(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Formato de número de tracking: `TRK` + 8 caracteres [A-Z0-9]
pub fn is_tracking_number(value: &str) -> bool {
    TRACKING_NUMBER_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Delhi").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_money() {
        assert!(validate_money(&Decimal::new(25, 1)).is_ok());
        assert!(validate_money(&Decimal::ZERO).is_ok());
        assert!(validate_money(&Decimal::new(-1, 2)).is_err());
        assert!(validate_money(&Decimal::from(MAX_MONEY)).is_ok());
        assert!(validate_money(&(Decimal::from(MAX_MONEY) + Decimal::new(1, 2))).is_err());
    }

    #[test]
    fn test_validate_non_negative_f64() {
        assert!(validate_non_negative_f64(12.5).is_ok());
        assert!(validate_non_negative_f64(-0.1).is_err());
        assert!(validate_non_negative_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_is_tracking_number() {
        assert!(is_tracking_number("TRKAB12CD34"));
        assert!(!is_tracking_number("TRKab12cd34"));
        assert!(!is_tracking_number("TRK1234567"));
        assert!(!is_tracking_number("XYZ12345678"));
    }
}
