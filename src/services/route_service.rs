//! Planificador de rutas de reparto
//!
//! Todas las comprobaciones se hacen antes de escribir nada; la inserción
//! de la ruta y la asignación de envíos van juntas en el repositorio.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::transportation_dto::RouteRequest;
use crate::models::{new_id, DeliveryRoute, RouteStatus, ShipmentStatus};
use crate::repositories::{RouteTransition, TransportRepository};
use crate::utils::errors::{bad_request_error, invalid_transition_error, AppError, AppResult};

pub struct RouteService {
    repository: Arc<dyn TransportRepository>,
}

impl RouteService {
    pub fn new(repository: Arc<dyn TransportRepository>) -> Self {
        Self { repository }
    }

    /// Crea una ruta `planned` y asigna sus envíos al vehículo
    pub async fn create_route(&self, request: RouteRequest) -> AppResult<DeliveryRoute> {
        request.validate()?;

        if request.shipments.is_empty() {
            return Err(bad_request_error("A route needs at least one shipment"));
        }
        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = request.shipments.iter().find(|id| !seen.insert(id.as_str())) {
                return Err(AppError::BadRequest(format!(
                    "Shipment {} is listed more than once",
                    duplicate
                )));
            }
        }

        self.repository
            .find_vehicle(&request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let found: HashMap<String, ShipmentStatus> = self
            .repository
            .find_shipments(&request.shipments)
            .await?
            .into_iter()
            .map(|s| (s.id, s.status))
            .collect();

        for shipment_id in &request.shipments {
            match found.get(shipment_id) {
                None => {
                    return Err(AppError::NotFound(format!("Shipment {} not found", shipment_id)));
                }
                Some(status) if !status.is_assignable() => {
                    return Err(AppError::InvalidState(format!(
                        "Shipment {} is not available for routing (status '{}')",
                        shipment_id, status
                    )));
                }
                Some(_) => {}
            }
        }

        let route = DeliveryRoute {
            id: new_id(),
            vehicle_id: request.vehicle_id,
            date: request.date,
            shipments: request.shipments,
            route_status: RouteStatus::Planned,
            total_distance: request.total_distance,
            estimated_duration: request.estimated_duration,
            created_at: Utc::now(),
        };

        self.repository.create_route(&route).await?;
        info!(
            "🗺️ Ruta {} creada: vehículo {}, {} envíos",
            route.id,
            route.vehicle_id,
            route.shipments.len()
        );

        Ok(route)
    }

    /// Cambia el estado de la ruta; `in_progress` pone sus envíos en tránsito
    pub async fn update_route_status(&self, route_id: &str, status: &str) -> AppResult<DeliveryRoute> {
        let target: RouteStatus = status.parse()?;

        let current = self
            .repository
            .find_route(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Delivery route not found".to_string()))?;

        if current.route_status == target {
            return Ok(current);
        }
        if !current.route_status.can_transition_to(target) {
            return Err(invalid_transition_error(current.route_status, target));
        }

        let transition = RouteTransition {
            route_id: current.id.clone(),
            from: current.route_status,
            to: target,
            shipment_status: (target == RouteStatus::InProgress).then_some(ShipmentStatus::InTransit),
        };

        let updated = self.repository.apply_route_transition(&transition).await?;
        info!(
            "🔄 Ruta {}: {} -> {}",
            updated.id, current.route_status, updated.route_status
        );

        Ok(updated)
    }

    /// Rutas, fecha más reciente primero
    pub async fn list(&self) -> AppResult<Vec<DeliveryRoute>> {
        self.repository.list_routes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Shipment, Vehicle, VehicleType};
    use crate::repositories::InMemoryTransportRepository;
    use chrono::{DateTime, TimeZone};

    fn shipment(id: &str, status: ShipmentStatus) -> Shipment {
        Shipment {
            id: id.to_string(),
            order_id: format!("order-{}", id),
            provider_id: "p-1".to_string(),
            vehicle_id: None,
            tracking_number: format!("TRK{:0>8}", id.to_uppercase()),
            status,
            estimated_delivery: Utc::now(),
            actual_delivery: None,
            delivery_notes: String::new(),
            created_at: Utc::now(),
        }
    }

    fn route_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    fn request(shipments: &[&str]) -> RouteRequest {
        RouteRequest {
            vehicle_id: "v-1".to_string(),
            date: route_date(),
            shipments: shipments.iter().map(|s| s.to_string()).collect(),
            total_distance: 42.5,
            estimated_duration: 90,
        }
    }

    async fn setup(shipments: Vec<Shipment>) -> (Arc<InMemoryTransportRepository>, RouteService) {
        let repository = Arc::new(InMemoryTransportRepository::new());
        repository
            .insert_vehicle(&Vehicle {
                id: "v-1".to_string(),
                provider_id: "p-1".to_string(),
                vehicle_number: "SWI-0101".to_string(),
                driver_name: "Driver 1-1".to_string(),
                vehicle_type: VehicleType::Truck,
                capacity: 1000,
                current_location: "Delhi Hub".to_string(),
                active: true,
            })
            .await
            .unwrap();
        for s in shipments {
            repository.insert_shipment(&s).await.unwrap();
        }
        let service = RouteService::new(repository.clone());
        (repository, service)
    }

    #[tokio::test]
    async fn test_create_route_assigns_shipments() {
        let (repository, service) = setup(vec![
            shipment("s1", ShipmentStatus::Pending),
            shipment("s2", ShipmentStatus::Assigned),
        ])
        .await;

        let route = service.create_route(request(&["s1", "s2"])).await.unwrap();
        assert_eq!(route.route_status, RouteStatus::Planned);
        assert_eq!(route.shipments, vec!["s1", "s2"]);

        for id in ["s1", "s2"] {
            let s = repository.find_shipment(id).await.unwrap().unwrap();
            assert_eq!(s.status, ShipmentStatus::Assigned);
            assert_eq!(s.vehicle_id.as_deref(), Some("v-1"));
        }
    }

    #[tokio::test]
    async fn test_create_route_rejects_ineligible_shipment_without_writes() {
        let (repository, service) = setup(vec![
            shipment("s1", ShipmentStatus::Pending),
            shipment("s2", ShipmentStatus::InTransit),
        ])
        .await;

        let result = service.create_route(request(&["s1", "s2"])).await;
        match result {
            Err(AppError::InvalidState(msg)) => assert!(msg.contains("s2")),
            other => panic!("expected InvalidState, got {:?}", other),
        }

        assert!(repository.list_routes().await.unwrap().is_empty());
        let s1 = repository.find_shipment("s1").await.unwrap().unwrap();
        assert_eq!(s1.status, ShipmentStatus::Pending);
        assert!(s1.vehicle_id.is_none());
        let s2 = repository.find_shipment("s2").await.unwrap().unwrap();
        assert_eq!(s2.status, ShipmentStatus::InTransit);
    }

    #[tokio::test]
    async fn test_create_route_input_errors() {
        let (_repository, service) = setup(vec![shipment("s1", ShipmentStatus::Pending)]).await;

        let missing = service.create_route(request(&["s1", "ghost"])).await;
        match missing {
            Err(AppError::NotFound(msg)) => assert!(msg.contains("ghost")),
            other => panic!("expected NotFound, got {:?}", other),
        }

        let empty = service.create_route(request(&[])).await;
        assert!(matches!(empty, Err(AppError::BadRequest(_))));

        let duplicated = service.create_route(request(&["s1", "s1"])).await;
        assert!(matches!(duplicated, Err(AppError::BadRequest(_))));

        let mut no_vehicle = request(&["s1"]);
        no_vehicle.vehicle_id = "v-404".to_string();
        assert!(matches!(
            service.create_route(no_vehicle).await,
            Err(AppError::NotFound(_))
        ));

        let mut negative = request(&["s1"]);
        negative.estimated_duration = -10;
        assert!(matches!(
            service.create_route(negative).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_in_progress_cascades_to_every_shipment() {
        let (repository, service) = setup(vec![
            shipment("s1", ShipmentStatus::Pending),
            shipment("s2", ShipmentStatus::Pending),
        ])
        .await;
        let route = service.create_route(request(&["s1", "s2"])).await.unwrap();

        // Un envío avanza por su cuenta antes de salir la ruta
        repository
            .apply_shipment_transition(&crate::repositories::ShipmentTransition {
                shipment_id: "s2".to_string(),
                from: ShipmentStatus::Assigned,
                to: ShipmentStatus::OutForDelivery,
                delivery_notes: String::new(),
                actual_delivery: None,
                order_status: None,
            })
            .await
            .unwrap();

        let updated = service.update_route_status(&route.id, "in_progress").await.unwrap();
        assert_eq!(updated.route_status, RouteStatus::InProgress);

        for id in ["s1", "s2"] {
            let s = repository.find_shipment(id).await.unwrap().unwrap();
            assert_eq!(s.status, ShipmentStatus::InTransit);
        }
    }

    #[tokio::test]
    async fn test_in_progress_cascade_overrides_delivered_shipment() {
        let (repository, service) = setup(vec![
            shipment("s1", ShipmentStatus::Pending),
            shipment("s2", ShipmentStatus::Pending),
        ])
        .await;
        let route = service.create_route(request(&["s1", "s2"])).await.unwrap();

        let delivered_at = Utc::now();
        repository
            .apply_shipment_transition(&crate::repositories::ShipmentTransition {
                shipment_id: "s2".to_string(),
                from: ShipmentStatus::Assigned,
                to: ShipmentStatus::Delivered,
                delivery_notes: "Left at reception".to_string(),
                actual_delivery: Some(delivered_at),
                order_status: None,
            })
            .await
            .unwrap();

        service.update_route_status(&route.id, "in_progress").await.unwrap();

        // La cascada no respeta estados terminales; la fecha de entrega se conserva
        let s2 = repository.find_shipment("s2").await.unwrap().unwrap();
        assert_eq!(s2.status, ShipmentStatus::InTransit);
        assert_eq!(s2.actual_delivery, Some(delivered_at));
        assert_eq!(s2.delivery_notes, "Left at reception");
    }

    #[tokio::test]
    async fn test_route_status_validation() {
        let (repository, service) = setup(vec![shipment("s1", ShipmentStatus::Pending)]).await;
        let route = service.create_route(request(&["s1"])).await.unwrap();

        let invalid = service.update_route_status(&route.id, "cancelled").await;
        match invalid {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("planned, in_progress, completed"))
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }

        let unknown = service.update_route_status("r-404", "completed").await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        let completed = service.update_route_status(&route.id, "completed").await.unwrap();
        assert_eq!(completed.route_status, RouteStatus::Completed);
        // Sin cascada al completar
        let s1 = repository.find_shipment("s1").await.unwrap().unwrap();
        assert_eq!(s1.status, ShipmentStatus::Assigned);

        let backwards = service.update_route_status(&route.id, "planned").await;
        assert!(matches!(backwards, Err(AppError::InvalidTransition { .. })));

        let same = service.update_route_status(&route.id, "completed").await.unwrap();
        assert_eq!(same, completed);
    }
}
