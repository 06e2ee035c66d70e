//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function -> Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── StoreError::QueryFailed(..)          ──┐                   │
//! │         ├── CoreError::InvalidStatusTransition   ──┼──► ApiError       │
//! │         ├── CoreError::IncompleteCheckout(fields)──┤    { code,        │
//! │         └── ValidationError (bad CLI argument)   ──┘      message,     │
//! │                                                           fields? }    │
//! │                                                                         │
//! │  Storage details are logged, callers see a generic message.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, FieldErrors, ValidationError};
use storefront_store::StoreError;
use thiserror::Error;

/// What a caller receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Checkout form is incomplete: email, zipCode",
///   "fields": { "email": "Email is required", "zipCode": "ZIP code is required" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    pub code: ErrorCode,

    pub message: String,

    /// Per-field messages for form errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    StorageError,
    /// A request that breaks an order or checkout rule.
    BusinessLogic,
    CartError,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// A validation error carrying the per-field messages.
    pub fn form(message: impl Into<String>, fields: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: message.into(),
            fields: Some(fields),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            StoreError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::PoolExhausted => ApiError::new(ErrorCode::StorageError, "Storage is busy"),
            StoreError::CorruptSnapshot { key, message } => {
                tracing::error!(key = %key, "Corrupt snapshot: {}", message);
                ApiError::new(ErrorCode::StorageError, "Stored data could not be read")
            }
            StoreError::QueryFailed(e) | StoreError::Serialization(e) | StoreError::Internal(e) => {
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::IncompleteCheckout(ref fields) => {
                let fields = fields.clone();
                ApiError::form(err.to_string(), fields)
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::form(err.to_string(), FieldErrors::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::OrderStatus;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Order", "ORD-1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Order not found: ORD-1");
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_incomplete_checkout_keeps_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("email", "Email is required");
        let err: ApiError = CoreError::IncompleteCheckout(fields).into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.fields.as_ref().and_then(|f| f.get("email")),
            Some("Email is required")
        );
    }

    #[test]
    fn test_transition_is_business_error() {
        let err: ApiError = CoreError::InvalidStatusTransition {
            order_id: "ORD-1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Shipped,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.to_string(), "[BusinessLogic] Order ORD-1 cannot move from delivered to shipped");
    }

    #[test]
    fn test_storage_details_hidden() {
        let err: ApiError = StoreError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("disk"));
    }
}
