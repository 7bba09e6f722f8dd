//! # API Error Type
//!
//! The one error type storefront services return.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService::place_order                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rule violation?  ─── CoreError::BelowMinimumQuantity ──┐              │
//! │         │                                               │              │
//! │         ▼                                               ▼              │
//! │  Store failure?   ─── StoreError::Unavailable ───────► ApiError        │
//! │         │                                          { code, message }   │
//! │         ▼                                               │              │
//! │  Success                                                ▼              │
//! │                                            CLI prints / frontend shows │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store internals are logged and replaced with a generic message; rule
//! violations pass their message through since the customer can act on it.

use serde::Serialize;

use malha_core::{CoreError, ValidationError};
use malha_store::StoreError;

/// Error returned from storefront services.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CHECKOUT_BLOCKED",
///   "message": "Checkout requires at least 5 items, cart has 3"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Hosted store failed (502)
    StoreError,

    /// Cart operation failed
    CartError,

    /// Size has no stock
    OutOfStock,

    /// Cart does not meet the checkout minimum
    CheckoutBlocked,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Rejected(reason) => {
                tracing::error!("Store rejected request: {}", reason);
                ApiError::new(ErrorCode::StoreError, "The store rejected the request")
            }
            StoreError::Unavailable(reason) => {
                tracing::error!("Store unavailable: {}", reason);
                ApiError::new(ErrorCode::StoreError, "The store is unavailable")
            }
            StoreError::InvalidPayload(reason) => {
                ApiError::validation(format!("Invalid data: {}", reason))
            }
            StoreError::Internal(reason) => {
                tracing::error!("Internal store error: {}", reason);
                ApiError::new(ErrorCode::StoreError, "Store operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::OutOfStock { .. } => ApiError::new(ErrorCode::OutOfStock, message),
            CoreError::ItemNotInCart { .. }
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::BelowMinimumQuantity { .. } | CoreError::EmptyCart => {
                ApiError::new(ErrorCode::CheckoutBlocked, message)
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for service results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_gate_maps_to_blocked() {
        let err = ApiError::from(CoreError::BelowMinimumQuantity {
            required: 5,
            actual: 3,
        });
        assert_eq!(err.code, ErrorCode::CheckoutBlocked);
        assert_eq!(err.message, "Checkout requires at least 5 items, cart has 3");
    }

    #[test]
    fn test_store_internals_are_hidden() {
        let err = ApiError::from(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(err.code, ErrorCode::StoreError);
        assert!(!err.message.contains("refused"));
    }

    #[test]
    fn test_validation_passes_through() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "email".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "email is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Team", "7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Team not found: 7");
    }
}
