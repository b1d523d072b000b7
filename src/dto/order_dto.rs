use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Línea de pedido tal como la envía el cliente
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineRequest {
    #[validate(custom = "validate_not_empty")]
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

// Request para crear un pedido
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<OrderLineRequest>,
    #[validate(custom = "validate_not_empty")]
    pub shipping_address: String,
}

// Dirección para previsualizar el coste del carrito (query o cuerpo)
#[derive(Debug, Clone, Deserialize)]
pub struct CartCostRequest {
    pub shipping_address: Option<String>,
}

// Estado de pedido fijado por un administrador (query o cuerpo)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusRequest {
    pub status: Option<String>,
}
