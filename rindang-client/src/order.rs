//! Order API

use crate::{ClientResult, HttpClient};
use shared::models::{ConfirmOrderRequest, CreateOrderRequest, Order, PaymentMethod};

impl HttpClient {
    /// Create an order for a backend table
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        tracing::info!(
            table_id = request.table_id,
            items = request.items.len(),
            "Creating order"
        );
        self.post("order/", request).await
    }

    /// Confirm payment of an order
    pub async fn confirm_order(&self, id: i64, method: PaymentMethod) -> ClientResult<Order> {
        let body = ConfirmOrderRequest {
            payment_method: method,
        };
        self.put(&format!("order/{}/confirm", id), &body).await
    }

    /// List orders (staff)
    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("order/").await
    }
}
