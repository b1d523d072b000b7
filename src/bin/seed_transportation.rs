//! Carga los proveedores de referencia y tres vehículos por proveedor.
//!
//! Si ya hay proveedores en la base de datos no hace nada.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shophub_backend::config::database::{run_migrations, DatabaseConfig};
use shophub_backend::models::{new_id, TransportationProvider, Vehicle, VehicleType};
use shophub_backend::repositories::{PgTransportRepository, TransportRepository};

const HUBS: [&str; 6] = [
    "Delhi Hub",
    "Mumbai Hub",
    "Bangalore Hub",
    "Chennai Hub",
    "Kolkata Hub",
    "Hyderabad Hub",
];

fn provider(
    name: &str,
    service_type: &str,
    base_cost: Decimal,
    cost_per_km: Decimal,
    estimated_days: i32,
    service_areas: &[&str],
) -> TransportationProvider {
    TransportationProvider {
        id: new_id(),
        name: name.to_string(),
        service_type: service_type.to_string(),
        base_cost,
        cost_per_km,
        estimated_days,
        service_areas: service_areas.iter().map(|s| s.to_string()).collect(),
        active: true,
    }
}

fn reference_providers() -> Vec<TransportationProvider> {
    vec![
        provider(
            "SwiftDelivery Express",
            "express",
            Decimal::from(80),
            Decimal::new(25, 1),
            1,
            &["Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata", "Hyderabad"],
        ),
        provider(
            "Standard Logistics",
            "standard",
            Decimal::from(40),
            Decimal::new(15, 1),
            3,
            &["All India"],
        ),
        provider(
            "Premium Overnight",
            "overnight",
            Decimal::from(150),
            Decimal::from(5),
            1,
            &["Major Cities"],
        ),
        provider("EconoShip", "economy", Decimal::from(25), Decimal::from(1), 5, &["All India"]),
        provider(
            "LocalDelivery Pro",
            "local",
            Decimal::from(60),
            Decimal::from(3),
            1,
            &["Same City"],
        ),
    ]
}

fn capacity_for(vehicle_type: VehicleType) -> i32 {
    match vehicle_type {
        VehicleType::Truck => 1000,
        VehicleType::Van => 500,
        VehicleType::Bike => 50,
    }
}

/// Tres vehículos (truck, van, bike) para el proveedor en la posición `index`
fn fleet_for(index: usize, provider: &TransportationProvider) -> Vec<Vehicle> {
    let prefix: String = provider.name.chars().take(3).collect::<String>().to_uppercase();

    [VehicleType::Truck, VehicleType::Van, VehicleType::Bike]
        .into_iter()
        .enumerate()
        .map(|(j, vehicle_type)| Vehicle {
            id: new_id(),
            provider_id: provider.id.clone(),
            vehicle_number: format!("{}-{:02}{:02}", prefix, index + 1, j + 1),
            driver_name: format!("Driver {}-{}", index + 1, j + 1),
            vehicle_type,
            capacity: capacity_for(vehicle_type),
            current_location: HUBS[j % HUBS.len()].to_string(),
            active: true,
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;
    run_migrations(&pool).await?;
    let repository = PgTransportRepository::new(pool);

    if !repository.list_providers().await?.is_empty() {
        info!("ℹ️ Ya existen proveedores, no se carga nada");
        return Ok(());
    }

    info!("📦 Creando proveedores de transporte...");
    let providers = reference_providers();
    for p in &providers {
        repository.insert_provider(p).await?;
    }
    info!("✅ {} proveedores creados", providers.len());

    info!("🚛 Creando vehículos...");
    let mut vehicle_count = 0;
    for (index, p) in providers.iter().enumerate() {
        for vehicle in fleet_for(index, p) {
            repository.insert_vehicle(&vehicle).await?;
            vehicle_count += 1;
        }
    }
    info!("✅ {} vehículos creados", vehicle_count);

    for p in &providers {
        info!(
            "  • {} ({}): {} + {}/km, {} días",
            p.name, p.service_type, p.base_cost, p.cost_per_km, p.estimated_days
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_numbers_and_capacities() {
        let providers = reference_providers();
        assert_eq!(providers.len(), 5);

        let fleet = fleet_for(1, &providers[1]);
        let numbers: Vec<&str> = fleet.iter().map(|v| v.vehicle_number.as_str()).collect();
        assert_eq!(numbers, vec!["STA-0201", "STA-0202", "STA-0203"]);
        let capacities: Vec<i32> = fleet.iter().map(|v| v.capacity).collect();
        assert_eq!(capacities, vec![1000, 500, 50]);
        assert!(fleet.iter().all(|v| v.provider_id == providers[1].id));
    }
}
