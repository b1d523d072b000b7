//! Colocación de pedidos
//!
//! Cotiza el transporte, guarda el pedido y crea su envío cuando hay
//! proveedor. Pedido y envío no comparten transacción.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::order_dto::PlaceOrderRequest;
use crate::models::{new_id, Order, OrderItem, OrderStatus};
use crate::repositories::TransportRepository;
use crate::services::cost_estimator::CostEstimator;
use crate::services::shipment_service::ShipmentService;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Previsualización del coste de transporte del carrito
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostPreview {
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_days: Option<i32>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<Decimal>,
}

impl CostPreview {
    fn empty_cart() -> Self {
        Self {
            cost: Decimal::ZERO,
            message: Some("Cart is empty".to_string()),
            provider_name: None,
            estimated_days: None,
            distance: None,
        }
    }
}

fn order_too_large() -> AppError {
    bad_request_error("Order total exceeds the supported amount")
}

pub struct OrderService {
    repository: Arc<dyn TransportRepository>,
    estimator: CostEstimator,
}

impl OrderService {
    pub fn new(repository: Arc<dyn TransportRepository>, estimator: CostEstimator) -> Self {
        Self {
            repository,
            estimator,
        }
    }

    /// Crea un pedido; queda `confirmed` si se le asignó proveedor
    pub async fn place_order(
        &self,
        user_id: &str,
        user_email: &str,
        request: PlaceOrderRequest,
    ) -> AppResult<Order> {
        request.validate()?;

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let product = self
                .repository
                .find_product(&line.product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Product {} not found", line.product_id)))?;

            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name,
                product_price: product.price,
                quantity: line.quantity,
                total: product
                    .price
                    .checked_mul(Decimal::from(line.quantity))
                    .ok_or_else(order_too_large)?,
            });
        }

        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.total))
            .ok_or_else(order_too_large)?;
        let quantities: Vec<i32> = items.iter().map(|item| item.quantity).collect();
        let quote = self
            .estimator
            .estimate(&request.shipping_address, &quantities)
            .await?;

        let mut order = Order {
            id: new_id(),
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            items,
            total_amount: subtotal.checked_add(quote.cost).ok_or_else(order_too_large)?,
            transportation_cost: quote.cost,
            status: OrderStatus::Pending,
            shipping_address: request.shipping_address.trim().to_string(),
            created_at: Utc::now(),
        };
        self.repository.insert_order(&order).await?;

        match &quote.provider_id {
            Some(provider_id) => {
                ShipmentService::new(self.repository.clone())
                    .create_for_order(&order.id, provider_id)
                    .await?;
                self.repository
                    .set_order_status(&order.id, OrderStatus::Confirmed)
                    .await?;
                order.status = OrderStatus::Confirmed;
            }
            None => warn!("⚠️ Pedido {} sin proveedor activo, queda pendiente", order.id),
        }

        self.repository.clear_cart(user_id).await?;
        info!(
            "🛒 Pedido {} de {}: total {} (transporte {} con {})",
            order.id, user_email, order.total_amount, order.transportation_cost, quote.provider_name
        );

        Ok(order)
    }

    /// Pedidos del usuario, más recientes primero
    pub async fn list_orders(&self, user_id: &str) -> AppResult<Vec<Order>> {
        self.repository.list_orders_for_user(user_id).await
    }

    /// Todos los pedidos (administración), más recientes primero
    pub async fn list_all_orders(&self) -> AppResult<Vec<Order>> {
        self.repository.list_orders().await
    }

    /// Cambio manual de estado de un pedido (administración)
    pub async fn update_order_status(&self, order_id: &str, status: &str) -> AppResult<Order> {
        let mut order = self
            .repository
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        let target: OrderStatus = status.parse()?;

        if !self.repository.set_order_status(order_id, target).await? {
            return Err(AppError::NotFound("Order not found".to_string()));
        }
        info!("📝 Pedido {}: {} -> {}", order.id, order.status, target);

        order.status = target;
        Ok(order)
    }

    /// Coste de transporte del carrito actual
    pub async fn cart_transport_cost(&self, user_id: &str, shipping_address: &str) -> AppResult<CostPreview> {
        if shipping_address.trim().is_empty() {
            return Err(bad_request_error("shipping_address is required"));
        }

        let lines = self.repository.cart_lines(user_id).await?;
        if lines.is_empty() {
            return Ok(CostPreview::empty_cart());
        }

        // Las líneas de productos retirados del catálogo no cuentan
        let mut quantities = Vec::with_capacity(lines.len());
        for line in &lines {
            if self.repository.find_product(&line.product_id).await?.is_some() {
                quantities.push(line.quantity);
            }
        }

        let quote = self.estimator.estimate(shipping_address, &quantities).await?;

        Ok(CostPreview {
            cost: quote.cost,
            message: None,
            provider_name: Some(quote.provider_name),
            estimated_days: Some(quote.estimated_days),
            distance: Some(quote.distance_km.unwrap_or(Decimal::ZERO)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::order_dto::OrderLineRequest;
    use crate::models::{CartLine, Product, ShipmentStatus, TransportationProvider};
    use crate::repositories::InMemoryTransportRepository;
    use crate::services::cost_estimator::FixedDistanceEstimator;

    async fn setup(with_provider: bool) -> (Arc<InMemoryTransportRepository>, OrderService) {
        let repository = Arc::new(InMemoryTransportRepository::new());
        if with_provider {
            repository
                .insert_provider(&TransportationProvider {
                    id: "p-std".to_string(),
                    name: "Standard Logistics".to_string(),
                    service_type: "standard".to_string(),
                    base_cost: Decimal::from(40),
                    cost_per_km: Decimal::new(15, 1),
                    estimated_days: 3,
                    service_areas: vec!["All India".to_string()],
                    active: true,
                })
                .await
                .unwrap();
        }
        repository
            .seed_product(Product {
                id: "prod-1".to_string(),
                name: "Kettle".to_string(),
                price: Decimal::new(1999, 2),
            })
            .await;

        let estimator = CostEstimator::new(
            repository.clone(),
            Arc::new(FixedDistanceEstimator::new(Decimal::from(20))),
            "Central Warehouse".to_string(),
        );
        let service = OrderService::new(repository.clone(), estimator);
        (repository, service)
    }

    fn order_request(quantity: i32) -> PlaceOrderRequest {
        PlaceOrderRequest {
            items: vec![OrderLineRequest {
                product_id: "prod-1".to_string(),
                quantity,
            }],
            shipping_address: "12 MG Road, Bangalore".to_string(),
        }
    }

    #[tokio::test]
    async fn test_place_order_confirms_and_creates_shipment() {
        let (repository, service) = setup(true).await;
        repository
            .seed_cart_line(CartLine {
                user_id: "u-1".to_string(),
                product_id: "prod-1".to_string(),
                quantity: 2,
            })
            .await;

        let order = service.place_order("u-1", "buyer@example.com", order_request(2)).await.unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.transportation_cost, Decimal::from(70));
        assert_eq!(order.total_amount, Decimal::new(10998, 2));
        assert_eq!(order.items[0].total, Decimal::new(3998, 2));

        let stored = repository.find_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Confirmed);
        let shipment = repository.find_shipment_by_order(&order.id).await.unwrap().unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.provider_id, "p-std");
        assert!(repository.cart_lines("u-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_without_providers_stays_pending() {
        let (repository, service) = setup(false).await;

        let order = service.place_order("u-1", "buyer@example.com", order_request(1)).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.transportation_cost, Decimal::from(50));
        assert!(repository.find_shipment_by_order(&order.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_place_order_unknown_product() {
        let (_repository, service) = setup(true).await;
        let mut request = order_request(1);
        request.items[0].product_id = "prod-404".to_string();

        let result = service.place_order("u-1", "buyer@example.com", request).await;
        match result {
            Err(AppError::NotFound(msg)) => assert!(msg.contains("prod-404")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_place_order_rejects_total_out_of_range() {
        let (repository, service) = setup(true).await;
        repository
            .seed_product(Product {
                id: "prod-1".to_string(),
                name: "Gilded Kettle".to_string(),
                price: Decimal::MAX / Decimal::from(2),
            })
            .await;

        let result = service.place_order("u-1", "buyer@example.com", order_request(3)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(repository.list_orders_for_user("u-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_validates_each_line() {
        let (_repository, service) = setup(true).await;
        let result = service.place_order("u-1", "buyer@example.com", order_request(0)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_admin_order_status_update() {
        let (repository, service) = setup(false).await;
        let first = service.place_order("u-1", "a@example.com", order_request(1)).await.unwrap();
        let second = service.place_order("u-2", "b@example.com", order_request(1)).await.unwrap();

        let all = service.list_all_orders().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id.as_str()) && ids.contains(&second.id.as_str()));

        let cancelled = service.update_order_status(&first.id, "cancelled").await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        let stored = repository.find_order(&first.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);

        assert!(matches!(
            service.update_order_status(&first.id, "shipped").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.update_order_status("o-404", "shipped").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cart_transport_cost() {
        let (repository, service) = setup(true).await;

        let empty = service.cart_transport_cost("u-1", "Delhi").await.unwrap();
        assert_eq!(empty, CostPreview::empty_cart());

        repository
            .seed_cart_line(CartLine {
                user_id: "u-1".to_string(),
                product_id: "prod-1".to_string(),
                quantity: 7,
            })
            .await;
        repository
            .seed_cart_line(CartLine {
                user_id: "u-1".to_string(),
                product_id: "retired".to_string(),
                quantity: 10,
            })
            .await;

        let preview = service.cart_transport_cost("u-1", "Delhi").await.unwrap();
        assert_eq!(preview.cost, Decimal::from(90));
        assert_eq!(preview.provider_name.as_deref(), Some("Standard Logistics"));
        assert_eq!(preview.estimated_days, Some(3));
        assert_eq!(preview.distance, Some(Decimal::from(20)));

        assert!(matches!(
            service.cart_transport_cost("u-1", " ").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
