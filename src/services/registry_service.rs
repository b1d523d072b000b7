//! Registro de proveedores y vehículos
//!
//! CRUD administrativo. El borrado es lógico (`active = false`).

use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::transportation_dto::{ProviderRequest, VehicleRequest};
use crate::models::{new_id, TransportationProvider, Vehicle, VehicleType};
use crate::repositories::TransportRepository;
use crate::utils::errors::{AppError, AppResult};

fn provider_not_found() -> AppError {
    AppError::NotFound("Transportation provider not found".to_string())
}

fn vehicle_not_found() -> AppError {
    AppError::NotFound("Vehicle not found".to_string())
}

pub struct RegistryService {
    repository: Arc<dyn TransportRepository>,
}

impl RegistryService {
    pub fn new(repository: Arc<dyn TransportRepository>) -> Self {
        Self { repository }
    }

    // --- Proveedores ---

    pub async fn create_provider(&self, request: ProviderRequest) -> AppResult<TransportationProvider> {
        request.validate()?;

        let provider = TransportationProvider {
            id: new_id(),
            name: request.name.trim().to_string(),
            service_type: request.service_type.trim().to_string(),
            base_cost: request.base_cost,
            cost_per_km: request.cost_per_km,
            estimated_days: request.estimated_days,
            service_areas: request.service_areas,
            active: true,
        };

        self.repository.insert_provider(&provider).await?;
        info!("🏢 Proveedor creado: {} ({})", provider.name, provider.id);

        Ok(provider)
    }

    pub async fn list_providers(&self) -> AppResult<Vec<TransportationProvider>> {
        self.repository.list_providers().await
    }

    /// Reemplaza los datos del proveedor conservando `active`
    pub async fn update_provider(
        &self,
        id: &str,
        request: ProviderRequest,
    ) -> AppResult<TransportationProvider> {
        request.validate()?;

        let current = self
            .repository
            .find_provider(id)
            .await?
            .ok_or_else(provider_not_found)?;

        let provider = TransportationProvider {
            id: current.id,
            name: request.name.trim().to_string(),
            service_type: request.service_type.trim().to_string(),
            base_cost: request.base_cost,
            cost_per_km: request.cost_per_km,
            estimated_days: request.estimated_days,
            service_areas: request.service_areas,
            active: current.active,
        };

        if !self.repository.update_provider(&provider).await? {
            return Err(provider_not_found());
        }

        Ok(provider)
    }

    pub async fn deactivate_provider(&self, id: &str) -> AppResult<()> {
        if !self.repository.deactivate_provider(id).await? {
            return Err(provider_not_found());
        }
        info!("🏢 Proveedor {} desactivado", id);
        Ok(())
    }

    // --- Vehículos ---

    pub async fn create_vehicle(&self, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        let vehicle_type: VehicleType = request.vehicle_type.parse()?;

        self.repository
            .find_provider(&request.provider_id)
            .await?
            .ok_or_else(provider_not_found)?;

        let vehicle = Vehicle {
            id: new_id(),
            provider_id: request.provider_id,
            vehicle_number: request.vehicle_number,
            driver_name: request.driver_name,
            vehicle_type,
            capacity: request.capacity,
            current_location: request.current_location,
            active: true,
        };

        self.repository.insert_vehicle(&vehicle).await?;
        info!("🚛 Vehículo {} creado para proveedor {}", vehicle.vehicle_number, vehicle.provider_id);

        Ok(vehicle)
    }

    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.list_vehicles().await
    }

    pub async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.repository.find_vehicle(id).await?.ok_or_else(vehicle_not_found)
    }

    /// Reemplaza los datos del vehículo conservando `active`
    pub async fn update_vehicle(&self, id: &str, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        let vehicle_type: VehicleType = request.vehicle_type.parse()?;

        let current = self.get_vehicle(id).await?;
        self.repository
            .find_provider(&request.provider_id)
            .await?
            .ok_or_else(provider_not_found)?;

        let vehicle = Vehicle {
            id: current.id,
            provider_id: request.provider_id,
            vehicle_number: request.vehicle_number,
            driver_name: request.driver_name,
            vehicle_type,
            capacity: request.capacity,
            current_location: request.current_location,
            active: current.active,
        };

        if !self.repository.update_vehicle(&vehicle).await? {
            return Err(vehicle_not_found());
        }

        Ok(vehicle)
    }

    pub async fn deactivate_vehicle(&self, id: &str) -> AppResult<()> {
        if !self.repository.deactivate_vehicle(id).await? {
            return Err(vehicle_not_found());
        }
        info!("🚛 Vehículo {} desactivado", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryTransportRepository;
    use rust_decimal::Decimal;

    fn provider_request(name: &str) -> ProviderRequest {
        ProviderRequest {
            name: name.to_string(),
            service_type: "express".to_string(),
            base_cost: Decimal::from(80),
            cost_per_km: Decimal::new(25, 1),
            estimated_days: 1,
            service_areas: vec!["Delhi".to_string(), "Mumbai".to_string()],
        }
    }

    fn vehicle_request(provider_id: &str, vehicle_type: &str) -> VehicleRequest {
        VehicleRequest {
            provider_id: provider_id.to_string(),
            vehicle_number: "SWI-0101".to_string(),
            driver_name: "Driver 1-1".to_string(),
            vehicle_type: vehicle_type.to_string(),
            capacity: 1000,
            current_location: "Delhi Hub".to_string(),
        }
    }

    fn service() -> RegistryService {
        RegistryService::new(Arc::new(InMemoryTransportRepository::new()))
    }

    #[tokio::test]
    async fn test_provider_lifecycle() {
        let registry = service();
        let created = registry.create_provider(provider_request("SwiftDelivery Express")).await.unwrap();
        assert!(created.active);

        let mut changes = provider_request("Swift Express");
        changes.base_cost = Decimal::from(90);
        let updated = registry.update_provider(&created.id, changes).await.unwrap();
        assert_eq!(updated.name, "Swift Express");
        assert_eq!(updated.base_cost, Decimal::from(90));

        registry.deactivate_provider(&created.id).await.unwrap();
        let providers = registry.list_providers().await.unwrap();
        assert_eq!(providers.len(), 1);
        assert!(!providers[0].active);

        // Actualizar no reactiva
        let again = registry
            .update_provider(&created.id, provider_request("Swift Express"))
            .await
            .unwrap();
        assert!(!again.active);
    }

    #[tokio::test]
    async fn test_provider_errors() {
        let registry = service();
        assert!(matches!(
            registry.update_provider("p-404", provider_request("X")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            registry.deactivate_provider("p-404").await,
            Err(AppError::NotFound(_))
        ));

        let mut negative = provider_request("Broken");
        negative.cost_per_km = Decimal::from(-1);
        assert!(matches!(
            registry.create_provider(negative).await,
            Err(AppError::Validation(_))
        ));

        let mut runaway = provider_request("Runaway Rates");
        runaway.cost_per_km = Decimal::from_f64_retain(5.0e27).unwrap();
        assert!(matches!(
            registry.create_provider(runaway).await,
            Err(AppError::Validation(_))
        ));
        assert!(registry.list_providers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vehicle_requires_existing_provider() {
        let registry = service();
        let result = registry.create_vehicle(vehicle_request("p-404", "truck")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_vehicle_lifecycle() {
        let registry = service();
        let provider = registry.create_provider(provider_request("EconoShip")).await.unwrap();

        let vehicle = registry.create_vehicle(vehicle_request(&provider.id, "van")).await.unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::Van);
        assert!(vehicle.active);

        let mut changes = vehicle_request(&provider.id, "bike");
        changes.capacity = 50;
        let updated = registry.update_vehicle(&vehicle.id, changes).await.unwrap();
        assert_eq!(updated.vehicle_type, VehicleType::Bike);
        assert_eq!(registry.get_vehicle(&vehicle.id).await.unwrap().capacity, 50);

        let moved = registry
            .update_vehicle(&vehicle.id, vehicle_request("p-404", "bike"))
            .await;
        assert!(matches!(moved, Err(AppError::NotFound(_))));

        registry.deactivate_vehicle(&vehicle.id).await.unwrap();
        assert!(!registry.get_vehicle(&vehicle.id).await.unwrap().active);
        assert_eq!(registry.list_vehicles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_vehicle_type_is_bad_request() {
        let registry = service();
        let provider = registry.create_provider(provider_request("EconoShip")).await.unwrap();
        let result = registry.create_vehicle(vehicle_request(&provider.id, "zeppelin")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
