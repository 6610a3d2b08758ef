//! Conversion of core errors into user-facing [`AppError`]s
//!
//! Every failure in the core ends as a message and an unchanged state;
//! these impls pick the stable [`ErrorCode`] shown with it.

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::reservation::FlowError;
use crate::session::AccessError;
use crate::storage::StorageError;
use crate::tables::{RegistryError, StoreError};
use crate::validation::ValidationError;
use shared::error::{AppError, ErrorCode};
use shared::models::TableStatus;

fn unavailable(table_id: &str, status: TableStatus) -> AppError {
    let code = match status {
        TableStatus::Reserved => ErrorCode::TableReserved,
        _ => ErrorCode::TableOccupied,
    };
    AppError::with_message(code, format!("Table {} is {}", table_id, status))
        .with_detail("table_id", table_id)
        .with_detail("status", status.as_str())
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            ValidationError::Required { field } | ValidationError::TooLong { field, .. } => {
                app.with_detail("field", field)
            }
            _ => app,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownTable(id) => AppError::with_message(
                ErrorCode::TableNotFound,
                format!("Unknown table: {}", id),
            ),
            other => AppError::storage(other.to_string()),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::with_message(ErrorCode::CartEmpty, err.to_string())
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Validation(e) => e.into(),
            FlowError::TableUnavailable { table_id, status } => unavailable(&table_id, status),
            FlowError::UnknownTable(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Unknown table: {}", id))
            }
            FlowError::TableNotSelected => AppError::new(ErrorCode::TableNotSelected),
            e @ FlowError::InvalidTransition { .. } => {
                AppError::with_message(ErrorCode::ReservationStepInvalid, e.to_string())
            }
            FlowError::Store(e) => e.into(),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Cart(e) => e.into(),
            CheckoutError::Validation(e) => e.into(),
            CheckoutError::TableUnavailable { table_id, status } => unavailable(&table_id, status),
            CheckoutError::UnknownTable(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Unknown table: {}", id))
            }
            CheckoutError::TableNotSelected => AppError::new(ErrorCode::TableNotSelected),
            e @ CheckoutError::BackendTableNotFound => {
                AppError::with_message(ErrorCode::TableNotFound, e.to_string())
            }
            e @ CheckoutError::OrderNotPlaced => {
                AppError::with_message(ErrorCode::OrderNotFound, e.to_string())
            }
            CheckoutError::Store(e) => e.into(),
        }
    }
}
