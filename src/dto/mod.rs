//! DTOs de la API
//!
//! Cuerpos de entrada de los endpoints. Las respuestas serializan los
//! modelos de dominio directamente.

pub mod order_dto;
pub mod transportation_dto;
