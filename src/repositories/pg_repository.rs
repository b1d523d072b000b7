//! Repositorio PostgreSQL
//!
//! Los estados se guardan como TEXT y se convierten a los enums del dominio
//! al leer cada fila. Las cascadas usan una transacción y un UPDATE
//! condicionado al estado esperado.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;

use super::{RouteTransition, ShipmentTransition, TransportRepository};
use crate::models::{
    CartLine, DeliveryRoute, Order, OrderItem, OrderStatus, Product, RouteStatus, Shipment,
    ShipmentStatus, TransportationProvider, Vehicle,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PgTransportRepository {
    pool: PgPool,
}

impl PgTransportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProviderRow {
    id: String,
    name: String,
    service_type: String,
    base_cost: Decimal,
    cost_per_km: Decimal,
    estimated_days: i32,
    service_areas: Vec<String>,
    active: bool,
}

impl From<ProviderRow> for TransportationProvider {
    fn from(row: ProviderRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            service_type: row.service_type,
            base_cost: row.base_cost,
            cost_per_km: row.cost_per_km,
            estimated_days: row.estimated_days,
            service_areas: row.service_areas,
            active: row.active,
        }
    }
}

#[derive(Debug, FromRow)]
struct VehicleRow {
    id: String,
    provider_id: String,
    vehicle_number: String,
    driver_name: String,
    vehicle_type: String,
    capacity: i32,
    current_location: String,
    active: bool,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_type: row
                .vehicle_type
                .parse()
                .map_err(|_| corrupt("vehicle", &row.id, "vehicle_type", &row.vehicle_type))?,
            id: row.id,
            provider_id: row.provider_id,
            vehicle_number: row.vehicle_number,
            driver_name: row.driver_name,
            capacity: row.capacity,
            current_location: row.current_location,
            active: row.active,
        })
    }
}

#[derive(Debug, FromRow)]
struct ShipmentRow {
    id: String,
    order_id: String,
    provider_id: String,
    vehicle_id: Option<String>,
    tracking_number: String,
    status: String,
    estimated_delivery: DateTime<Utc>,
    actual_delivery: Option<DateTime<Utc>>,
    delivery_notes: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = AppError;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row
                .status
                .parse()
                .map_err(|_| corrupt("shipment", &row.id, "status", &row.status))?,
            id: row.id,
            order_id: row.order_id,
            provider_id: row.provider_id,
            vehicle_id: row.vehicle_id,
            tracking_number: row.tracking_number,
            estimated_delivery: row.estimated_delivery,
            actual_delivery: row.actual_delivery,
            delivery_notes: row.delivery_notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct RouteRow {
    id: String,
    vehicle_id: String,
    date: DateTime<Utc>,
    shipments: Vec<String>,
    route_status: String,
    total_distance: f64,
    estimated_duration: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<RouteRow> for DeliveryRoute {
    type Error = AppError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            route_status: row
                .route_status
                .parse()
                .map_err(|_| corrupt("delivery route", &row.id, "route_status", &row.route_status))?,
            id: row.id,
            vehicle_id: row.vehicle_id,
            date: row.date,
            shipments: row.shipments,
            total_distance: row.total_distance,
            estimated_duration: row.estimated_duration,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    user_email: String,
    items: Json<Vec<OrderItem>>,
    total_amount: Decimal,
    transportation_cost: Decimal,
    status: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row
                .status
                .parse()
                .map_err(|_| corrupt("order", &row.id, "status", &row.status))?,
            id: row.id,
            user_id: row.user_id,
            user_email: row.user_email,
            items: row.items.0,
            total_amount: row.total_amount,
            transportation_cost: row.transportation_cost,
            shipping_address: row.shipping_address,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: Decimal,
}

#[derive(Debug, FromRow)]
struct CartRow {
    user_id: String,
    product_id: String,
    quantity: i32,
}

fn corrupt(entity: &str, id: &str, field: &str, value: &str) -> AppError {
    AppError::Internal(format!(
        "Stored {} '{}' has unknown {} '{}'",
        entity, id, field, value
    ))
}

fn collect_rows<R, T>(rows: Vec<R>) -> AppResult<Vec<T>>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn status_strings(statuses: &[ShipmentStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

#[async_trait]
impl TransportRepository for PgTransportRepository {
    async fn insert_provider(&self, provider: &TransportationProvider) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transportation_providers
                (id, name, service_type, base_cost, cost_per_km, estimated_days, service_areas, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&provider.id)
        .bind(&provider.name)
        .bind(&provider.service_type)
        .bind(provider.base_cost)
        .bind(provider.cost_per_km)
        .bind(provider.estimated_days)
        .bind(&provider.service_areas)
        .bind(provider.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_providers(&self) -> AppResult<Vec<TransportationProvider>> {
        let rows = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id, name, service_type, base_cost, cost_per_km, estimated_days, service_areas, active
            FROM transportation_providers
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_active_providers(&self) -> AppResult<Vec<TransportationProvider>> {
        let rows = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id, name, service_type, base_cost, cost_per_km, estimated_days, service_areas, active
            FROM transportation_providers
            WHERE active
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_provider(&self, id: &str) -> AppResult<Option<TransportationProvider>> {
        let row = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id, name, service_type, base_cost, cost_per_km, estimated_days, service_areas, active
            FROM transportation_providers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_provider(&self, provider: &TransportationProvider) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transportation_providers
            SET name = $2, service_type = $3, base_cost = $4, cost_per_km = $5,
                estimated_days = $6, service_areas = $7, active = $8
            WHERE id = $1
            "#,
        )
        .bind(&provider.id)
        .bind(&provider.name)
        .bind(&provider.service_type)
        .bind(provider.base_cost)
        .bind(provider.cost_per_km)
        .bind(provider.estimated_days)
        .bind(&provider.service_areas)
        .bind(provider.active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_provider(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE transportation_providers SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_vehicle(&self, vehicle: &Vehicle) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles
                (id, provider_id, vehicle_number, driver_name, vehicle_type, capacity, current_location, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.provider_id)
        .bind(&vehicle.vehicle_number)
        .bind(&vehicle.driver_name)
        .bind(vehicle.vehicle_type.as_str())
        .bind(vehicle.capacity)
        .bind(&vehicle.current_location)
        .bind(vehicle.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, provider_id, vehicle_number, driver_name, vehicle_type, capacity, current_location, active
            FROM vehicles
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn find_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, provider_id, vehicle_number, driver_name, vehicle_type, capacity, current_location, active
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET provider_id = $2, vehicle_number = $3, driver_name = $4, vehicle_type = $5,
                capacity = $6, current_location = $7, active = $8
            WHERE id = $1
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.provider_id)
        .bind(&vehicle.vehicle_number)
        .bind(&vehicle.driver_name)
        .bind(vehicle.vehicle_type.as_str())
        .bind(vehicle.capacity)
        .bind(&vehicle.current_location)
        .bind(vehicle.active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_vehicle(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE vehicles SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn first_active_vehicle(&self, provider_id: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, provider_id, vehicle_number, driver_name, vehicle_type, capacity, current_location, active
            FROM vehicles
            WHERE provider_id = $1 AND active
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn insert_shipment(&self, shipment: &Shipment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shipments
                (id, order_id, provider_id, vehicle_id, tracking_number, status,
                 estimated_delivery, actual_delivery, delivery_notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&shipment.id)
        .bind(&shipment.order_id)
        .bind(&shipment.provider_id)
        .bind(&shipment.vehicle_id)
        .bind(&shipment.tracking_number)
        .bind(shipment.status.as_str())
        .bind(shipment.estimated_delivery)
        .bind(shipment.actual_delivery)
        .bind(&shipment.delivery_notes)
        .bind(shipment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Shipment for order '{}' or tracking number '{}' already exists",
                shipment.order_id, shipment.tracking_number
            )),
            _ => AppError::Database(e),
        })?;

        Ok(())
    }

    async fn list_shipments(&self) -> AppResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider_id, vehicle_id, tracking_number, status,
                   estimated_delivery, actual_delivery, delivery_notes, created_at
            FROM shipments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn find_shipment(&self, id: &str) -> AppResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider_id, vehicle_id, tracking_number, status,
                   estimated_delivery, actual_delivery, delivery_notes, created_at
            FROM shipments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Shipment::try_from).transpose()
    }

    async fn find_shipments(&self, ids: &[String]) -> AppResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider_id, vehicle_id, tracking_number, status,
                   estimated_delivery, actual_delivery, delivery_notes, created_at
            FROM shipments
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn find_shipment_by_tracking(&self, tracking_number: &str) -> AppResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider_id, vehicle_id, tracking_number, status,
                   estimated_delivery, actual_delivery, delivery_notes, created_at
            FROM shipments
            WHERE tracking_number = $1
            "#,
        )
        .bind(tracking_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Shipment::try_from).transpose()
    }

    async fn find_shipment_by_order(&self, order_id: &str) -> AppResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider_id, vehicle_id, tracking_number, status,
                   estimated_delivery, actual_delivery, delivery_notes, created_at
            FROM shipments
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Shipment::try_from).transpose()
    }

    async fn tracking_number_exists(&self, tracking_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM shipments WHERE tracking_number = $1)")
                .bind(tracking_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn apply_shipment_transition(&self, transition: &ShipmentTransition) -> AppResult<Shipment> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            UPDATE shipments
            SET status = $3,
                delivery_notes = $4,
                actual_delivery = COALESCE($5, actual_delivery)
            WHERE id = $1 AND status = $2
            RETURNING id, order_id, provider_id, vehicle_id, tracking_number, status,
                      estimated_delivery, actual_delivery, delivery_notes, created_at
            "#,
        )
        .bind(&transition.shipment_id)
        .bind(transition.from.as_str())
        .bind(transition.to.as_str())
        .bind(&transition.delivery_notes)
        .bind(transition.actual_delivery)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return match self.find_shipment(&transition.shipment_id).await? {
                Some(current) => Err(AppError::Conflict(format!(
                    "Shipment '{}' changed status concurrently (expected '{}', found '{}')",
                    current.id, transition.from, current.status
                ))),
                None => Err(not_found_error("Shipment", &transition.shipment_id)),
            };
        };
        let shipment = Shipment::try_from(row)?;

        if let Some(order_status) = transition.order_status {
            sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
                .bind(&shipment.order_id)
                .bind(order_status.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(shipment)
    }

    async fn create_route(&self, route: &DeliveryRoute) -> AppResult<()> {
        let unique_ids: Vec<String> = route
            .shipments
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO delivery_routes
                (id, vehicle_id, date, shipments, route_status, total_distance, estimated_duration, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&route.id)
        .bind(&route.vehicle_id)
        .bind(route.date)
        .bind(&route.shipments)
        .bind(route.route_status.as_str())
        .bind(route.total_distance)
        .bind(route.estimated_duration)
        .bind(route.created_at)
        .execute(&mut *tx)
        .await?;

        // CAS: solo se asignan envíos que siguen en pending/assigned
        let assigned = sqlx::query(
            r#"
            UPDATE shipments
            SET status = $1, vehicle_id = $2
            WHERE id = ANY($3) AND status = ANY($4)
            "#,
        )
        .bind(ShipmentStatus::Assigned.as_str())
        .bind(&route.vehicle_id)
        .bind(&unique_ids)
        .bind(status_strings(&ShipmentStatus::ASSIGNABLE))
        .execute(&mut *tx)
        .await?;

        if assigned.rows_affected() != unique_ids.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "One or more shipments are no longer available for routing".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_routes(&self) -> AppResult<Vec<DeliveryRoute>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, vehicle_id, date, shipments, route_status, total_distance, estimated_duration, created_at
            FROM delivery_routes
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn find_route(&self, id: &str) -> AppResult<Option<DeliveryRoute>> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, vehicle_id, date, shipments, route_status, total_distance, estimated_duration, created_at
            FROM delivery_routes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DeliveryRoute::try_from).transpose()
    }

    async fn apply_route_transition(&self, transition: &RouteTransition) -> AppResult<DeliveryRoute> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            UPDATE delivery_routes
            SET route_status = $3
            WHERE id = $1 AND route_status = $2
            RETURNING id, vehicle_id, date, shipments, route_status, total_distance, estimated_duration, created_at
            "#,
        )
        .bind(&transition.route_id)
        .bind(transition.from.as_str())
        .bind(transition.to.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return match self.find_route(&transition.route_id).await? {
                Some(current) => Err(AppError::Conflict(format!(
                    "Delivery route '{}' changed status concurrently (expected '{}', found '{}')",
                    current.id, transition.from, current.route_status
                ))),
                None => Err(not_found_error("Delivery route", &transition.route_id)),
            };
        };
        let route = DeliveryRoute::try_from(row)?;

        if let Some(status) = transition.shipment_status {
            sqlx::query("UPDATE shipments SET status = $1 WHERE id = ANY($2)")
                .bind(status.as_str())
                .bind(&route.shipments)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(route)
    }

    async fn insert_order(&self, order: &Order) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, user_id, user_email, items, total_amount, transportation_cost, status, shipping_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&order.user_email)
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.transportation_cost)
        .bind(order.status.as_str())
        .bind(&order.shipping_address)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_order(&self, id: &str) -> AppResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, user_email, items, total_amount, transportation_cost, status, shipping_address, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn list_orders_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, user_email, items, total_amount, transportation_cost, status, shipping_address, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, user_email, items, total_amount, transportation_cost, status, shipping_address, created_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_product(&self, id: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Product {
            id: r.id,
            name: r.name,
            price: r.price,
        }))
    }

    async fn cart_lines(&self, user_id: &str) -> AppResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT user_id, product_id, quantity FROM cart_items WHERE user_id = $1 ORDER BY added_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CartLine {
                user_id: r.user_id,
                product_id: r.product_id,
                quantity: r.quantity,
            })
            .collect())
    }

    async fn clear_cart(&self, user_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
