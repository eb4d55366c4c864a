//! Payment gateway collaborator
//!
//! Only order creation goes to the gateway; callback verification is local
//! (see `signature`). `MockGateway` stands in for a live provider in tests
//! and development.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;

/// Gateway-side failures; surfaced to callers as a transient condition
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),

    #[error("payment gateway rejected the order: {0}")]
    Rejected(String),
}

/// Context attached to a gateway order for later reconciliation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetadata {
    pub booking_id: String,
    pub property_id: String,
    pub user_id: String,
    /// Merchant-side receipt label, `booking_{id}`
    pub receipt: String,
}

/// Order handle returned by the gateway
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        amount_minor_units: i64,
        currency: &str,
        metadata: OrderMetadata,
    ) -> Result<PaymentOrder, GatewayError>;
}

/// In-process gateway stub; records every order it issues
#[derive(Debug, Default)]
pub struct MockGateway {
    orders: DashMap<String, (PaymentOrder, OrderMetadata)>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously created order, for assertions in tests
    pub fn order(&self, order_id: &str) -> Option<(PaymentOrder, OrderMetadata)> {
        self.orders.get(order_id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        amount_minor_units: i64,
        currency: &str,
        metadata: OrderMetadata,
    ) -> Result<PaymentOrder, GatewayError> {
        if amount_minor_units <= 0 {
            return Err(GatewayError::Rejected(format!(
                "non-positive amount: {amount_minor_units}"
            )));
        }
        let order = PaymentOrder {
            order_id: format!("order_{}", uuid::Uuid::new_v4().simple()),
            amount: amount_minor_units,
            currency: currency.to_string(),
        };
        self.orders
            .insert(order.order_id.clone(), (order.clone(), metadata));
        Ok(order)
    }
}
