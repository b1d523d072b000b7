//! Vista de solo lectura del catálogo y del carrito.
//!
//! Ambos pertenecen a otros servicios; aquí solo se consultan precios y
//! cantidades para cotizar el transporte.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
}
