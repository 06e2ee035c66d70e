//! # Error Types
//!
//! Domain errors for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront-core (this file)                                           │
//! │  ├── CoreError        - business rule violations (orders, checkout)    │
//! │  └── ValidationError  - a single malformed input                       │
//! │                                                                         │
//! │  storefront-store                                                      │
//! │  └── StoreError       - persistence failures                           │
//! │                                                                         │
//! │  apps/storefront                                                       │
//! │  └── ApiError         - what callers see (code + message)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never fail: bad quantities are clamped and unknown ids are
//! ignored. Lookups return `Option`. Only mutations that cannot be clamped
//! (status transitions, placing an order) produce a `CoreError`.

use thiserror::Error;

use crate::types::OrderStatus;
use crate::validation::FieldErrors;

/// Business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status update or cancellation named an order that does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The requested status would move the order backwards or off a terminal
    /// state.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Checkout cannot advance or complete until these fields are fixed.
    #[error("Checkout form is incomplete: {}", .0.summary())]
    IncompleteCheckout(FieldErrors),

    /// Placing an order with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStatusTransition {
            order_id: "ORD-1".to_string(),
            from: OrderStatus::Shipped,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "Order ORD-1 cannot move from shipped to cancelled");

        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "city".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
