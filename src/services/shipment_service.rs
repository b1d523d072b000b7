//! Ciclo de vida de los envíos
//!
//! Crea el envío de un pedido, aplica las transiciones de estado y resuelve
//! las consultas de tracking. La cascada `delivered` → pedido entregado se
//! aplica en la misma transacción que el cambio de estado.

use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::dto::transportation_dto::ShipmentUpdateRequest;
use crate::models::{new_id, Order, OrderStatus, Shipment, ShipmentStatus, TransportationProvider, Vehicle};
use crate::repositories::{ShipmentTransition, TransportRepository};
use crate::services::tracking::generate_unique_tracking_number;
use crate::utils::errors::{invalid_transition_error, not_found_error, AppError, AppResult};
use crate::utils::validation::is_tracking_number;

/// Días de entrega cuando el proveedor ya no existe
const DEFAULT_ESTIMATED_DAYS: i32 = 3;

/// Respuesta pública de tracking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackingDetails {
    pub shipment: Shipment,
    pub order: Option<Order>,
    pub provider: Option<TransportationProvider>,
    pub vehicle: Option<Vehicle>,
}

/// Envío de un pedido propio del cliente
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderShipment {
    pub shipment: Shipment,
    pub provider: Option<TransportationProvider>,
    pub vehicle: Option<Vehicle>,
}

pub struct ShipmentService {
    repository: Arc<dyn TransportRepository>,
}

impl ShipmentService {
    pub fn new(repository: Arc<dyn TransportRepository>) -> Self {
        Self { repository }
    }

    /// Crea el envío `pending` de un pedido y devuelve su id.
    ///
    /// Sin vehículo activo el envío queda con `vehicle_id` nulo; sin
    /// proveedor el plazo es de 3 días.
    pub async fn create_for_order(&self, order_id: &str, provider_id: &str) -> AppResult<String> {
        let vehicle = self.repository.first_active_vehicle(provider_id).await?;
        let estimated_days = self
            .repository
            .find_provider(provider_id)
            .await?
            .map(|p| p.estimated_days)
            .unwrap_or(DEFAULT_ESTIMATED_DAYS);

        let tracking_number = generate_unique_tracking_number(self.repository.as_ref()).await?;
        let now = Utc::now();

        let shipment = Shipment {
            id: new_id(),
            order_id: order_id.to_string(),
            provider_id: provider_id.to_string(),
            vehicle_id: vehicle.map(|v| v.id),
            tracking_number,
            status: ShipmentStatus::Pending,
            estimated_delivery: now + Duration::days(i64::from(estimated_days)),
            actual_delivery: None,
            delivery_notes: String::new(),
            created_at: now,
        };

        self.repository.insert_shipment(&shipment).await?;
        info!(
            "📦 Envío {} creado para pedido {} ({})",
            shipment.id, order_id, shipment.tracking_number
        );

        Ok(shipment.id)
    }

    /// Cambia estado y notas de un envío
    pub async fn update_status(&self, shipment_id: &str, request: ShipmentUpdateRequest) -> AppResult<Shipment> {
        let current = self
            .repository
            .find_shipment(shipment_id)
            .await?
            .ok_or_else(|| not_found_error("Shipment", shipment_id))?;
        let target: ShipmentStatus = request.status.parse()?;

        if !current.status.can_transition_to(target) {
            return Err(invalid_transition_error(current.status, target));
        }

        let delivered = target == ShipmentStatus::Delivered;
        let transition = ShipmentTransition {
            shipment_id: current.id.clone(),
            from: current.status,
            to: target,
            delivery_notes: request.delivery_notes,
            actual_delivery: delivered.then(Utc::now),
            order_status: delivered.then_some(OrderStatus::Delivered),
        };

        let updated = self.repository.apply_shipment_transition(&transition).await?;

        if delivered {
            info!("✅ Envío {} entregado, pedido {} marcado como entregado", updated.id, updated.order_id);
        } else {
            debug!("🔄 Envío {}: {} -> {}", updated.id, current.status, updated.status);
        }

        Ok(updated)
    }

    /// Consulta pública por número de tracking
    pub async fn track(&self, tracking_number: &str) -> AppResult<TrackingDetails> {
        if !is_tracking_number(tracking_number) {
            return Err(AppError::NotFound("Shipment not found".to_string()));
        }

        let shipment = self
            .repository
            .find_shipment_by_tracking(tracking_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        let order = self.repository.find_order(&shipment.order_id).await?;
        let (provider, vehicle) = self.resolve_carrier(&shipment).await?;

        Ok(TrackingDetails {
            shipment,
            order,
            provider,
            vehicle,
        })
    }

    /// Envío de un pedido del usuario; pedidos ajenos se tratan como inexistentes
    pub async fn shipment_for_order(&self, user_id: &str, order_id: &str) -> AppResult<OrderShipment> {
        self.repository
            .find_order(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let shipment = self
            .repository
            .find_shipment_by_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        let (provider, vehicle) = self.resolve_carrier(&shipment).await?;

        Ok(OrderShipment {
            shipment,
            provider,
            vehicle,
        })
    }

    /// Todos los envíos, más recientes primero
    pub async fn list(&self) -> AppResult<Vec<Shipment>> {
        self.repository.list_shipments().await
    }

    async fn resolve_carrier(
        &self,
        shipment: &Shipment,
    ) -> AppResult<(Option<TransportationProvider>, Option<Vehicle>)> {
        let provider = self.repository.find_provider(&shipment.provider_id).await?;
        let vehicle = match &shipment.vehicle_id {
            Some(vehicle_id) => self.repository.find_vehicle(vehicle_id).await?,
            None => None,
        };
        Ok((provider, vehicle))
    }
}
