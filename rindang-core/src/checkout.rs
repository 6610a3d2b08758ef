//! Menu order checkout
//!
//! cart → table → customer name → order created (table occupied) →
//! payment method → payment confirmed. The backend calls happen outside;
//! this type builds their payloads and enforces the ordering rules.

use crate::cart::{Cart, CartError};
use crate::tables::{FloorPlan, Pick, PointerPos, StoreError, TableRegistry, TableStatusStore};
use crate::validation::{MAX_NAME_LEN, ValidationError, validate_required_text};
use shared::models::{
    BackendTable, ConfirmOrderRequest, CreateOrderRequest, PaymentMethod, Table, TableStatus,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Table {table_id} is {status}")]
    TableUnavailable {
        table_id: String,
        status: TableStatus,
    },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Please select a table first")]
    TableNotSelected,

    #[error("No matching table on the server, sync tables and try again")]
    BackendTableNotFound,

    #[error("No order has been placed yet")]
    OrderNotPlaced,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct OrderCheckout {
    cart: Cart,
    selected: Option<String>,
    customer: String,
    payment_method: Option<PaymentMethod>,
    order_id: Option<i64>,
}

impl OrderCheckout {
    pub fn begin(cart: Cart) -> Result<Self, CheckoutError> {
        cart.ensure_ready_for_table_selection()?;
        Ok(Self {
            cart,
            selected: None,
            customer: String::new(),
            payment_method: None,
            order_id: None,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn order_id(&self) -> Option<i64> {
        self.order_id
    }

    pub fn pick_table<'a>(
        &mut self,
        plan: &FloorPlan,
        registry: &'a TableRegistry,
        store: &TableStatusStore,
        pos: PointerPos,
    ) -> Result<Pick<'a>, CheckoutError> {
        let pick = plan.pick(registry, store, pos);
        match pick {
            Pick::Selected(table) => self.selected = Some(table.id.clone()),
            Pick::Unavailable { table, status } => {
                return Err(CheckoutError::TableUnavailable {
                    table_id: table.id.clone(),
                    status,
                });
            }
            Pick::Miss => {}
        }
        Ok(pick)
    }

    pub fn select_table<'a>(
        &mut self,
        id: &str,
        registry: &'a TableRegistry,
        store: &TableStatusStore,
    ) -> Result<&'a Table, CheckoutError> {
        let table = registry
            .get(id)
            .ok_or_else(|| CheckoutError::UnknownTable(id.to_string()))?;
        match store.status(&table.id) {
            TableStatus::Free => {
                self.selected = Some(table.id.clone());
                Ok(table)
            }
            status => Err(CheckoutError::TableUnavailable {
                table_id: table.id.clone(),
                status,
            }),
        }
    }

    pub fn set_customer(&mut self, name: impl Into<String>) {
        self.customer = name.into();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// `POST /order` payload
    ///
    /// The marker's table number picks the backend row; when none matches,
    /// the first `available` backend table is used.
    pub fn build_order(
        &self,
        registry: &TableRegistry,
        backend_tables: &[BackendTable],
    ) -> Result<CreateOrderRequest, CheckoutError> {
        let table_id = self.selected.as_deref().ok_or(CheckoutError::TableNotSelected)?;
        validate_required_text(&self.customer, "customer", MAX_NAME_LEN)
            .map_err(|_| ValidationError::CustomerRequired)?;

        let by_number = registry
            .table_no_for(table_id)
            .and_then(|no| backend_tables.iter().find(|b| b.table_no == no));
        let backend = match by_number {
            Some(row) => row,
            None => {
                let fallback = backend_tables
                    .iter()
                    .find(|b| b.local_status() == Some(TableStatus::Free))
                    .ok_or(CheckoutError::BackendTableNotFound)?;
                tracing::warn!(
                    table_id = %table_id,
                    backend_table_id = fallback.id,
                    "No backend table for marker, using first available"
                );
                fallback
            }
        };

        Ok(CreateOrderRequest {
            table_id: backend.id,
            customer: self.customer.trim().to_string(),
            items: self.cart.order_items(),
        })
    }

    /// The selected table, provided it is still free in `store`
    pub fn ensure_table_free(&self, store: &TableStatusStore) -> Result<&str, CheckoutError> {
        let table_id = self.selected.as_deref().ok_or(CheckoutError::TableNotSelected)?;
        match store.status(table_id) {
            TableStatus::Free => Ok(table_id),
            status => {
                tracing::warn!(table_id = %table_id, %status, "Selected table is no longer free");
                Err(CheckoutError::TableUnavailable {
                    table_id: table_id.to_string(),
                    status,
                })
            }
        }
    }

    /// Record the created order and mark the chosen table occupied
    ///
    /// The table must still be free; a reservation confirmed since
    /// selection is never overwritten.
    pub fn mark_placed(
        &mut self,
        order_id: i64,
        store: &mut TableStatusStore,
    ) -> Result<(), CheckoutError> {
        let table_id = self.ensure_table_free(store)?.to_string();
        store.set(&table_id, TableStatus::Occupied)?;
        self.order_id = Some(order_id);
        tracing::info!(order_id, table_id = %table_id, "Order placed");
        Ok(())
    }

    /// `PUT /order/{id}/confirm` id and payload
    pub fn confirm_request(&self) -> Result<(i64, ConfirmOrderRequest), CheckoutError> {
        let order_id = self.order_id.ok_or(CheckoutError::OrderNotPlaced)?;
        let payment_method = self
            .payment_method
            .ok_or(ValidationError::PaymentMethodRequired)?;
        Ok((order_id, ConfirmOrderRequest { payment_method }))
    }

    /// Payment went through: hand back the emptied cart for the next order
    pub fn complete(self) -> Cart {
        let mut cart = self.cart;
        cart.clear();
        cart
    }
}
