//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method offered at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "E-Wallet")]
    EWallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::EWallet => "E-Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`PaymentMethod`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "cash" => Ok(Self::Cash),
            "ewallet" => Ok(Self::EWallet),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Order as returned by `GET /order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    #[serde(default)]
    pub customer: String,
    #[serde(default, deserialize_with = "crate::price::deserialize_amount")]
    pub total_amount: i64,
    /// Empty until the order is confirmed
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub status: String,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.status.eq_ignore_ascii_case("paid")
    }
}

/// One line of a create-order payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub menu_id: i64,
    pub qty: u32,
}

/// Create order payload (`POST /order`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub table_id: i64,
    pub customer: String,
    pub items: Vec<OrderItemRequest>,
}

/// Confirm order payload (`PUT /order/{id}/confirm`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmOrderRequest {
    pub payment_method: PaymentMethod,
}
