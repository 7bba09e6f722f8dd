//! # Error Types
//!
//! Domain-specific error types for malha-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  malha-core errors (this file)                                         │
//! │  ├── CoreError        - Cart and checkout rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  malha-store errors (separate crate)                                   │
//! │  └── StoreError       - Hosted backend failures                        │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                          StoreError ─┴─► ApiError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine has no error type: it is total over its inputs.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested size has no stock for this team.
    ///
    /// ## User Workflow
    /// ```text
    /// Size picker: "GG"
    ///      │
    ///      ▼
    /// stock_for(GG) == 0
    ///      │
    ///      ▼
    /// OutOfStock { team: "Flamengo 2024", size: "GG" }
    ///      │
    ///      ▼
    /// UI shows: "Esgotado"
    /// ```
    #[error("{team} is out of stock in size {size}")]
    OutOfStock { team: String, size: String },

    /// Attempted to change a (team, size) line that is not in the cart.
    #[error("Team {team_id} size {size} is not in the cart")]
    ItemNotInCart { team_id: i64, size: String },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout attempted below the minimum unit count.
    ///
    /// This is the storefront's caller-side gate; the pricing engine itself
    /// happily prices any cart.
    #[error("Checkout requires at least {required} items, cart has {actual}")]
    BelowMinimumQuantity { required: i64, actual: i64 },

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A form or input rule failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A form field or cart input that failed its rule.
///
/// `field` is the form's field name, so the frontend can highlight it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Quantity or price outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Malformed CEP, e-mail, state or user id.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Unknown size code or an unavailable payment method.
    #[error("{field} must be one of: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a cart or checkout operation.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OutOfStock {
            team: "Flamengo 2024".to_string(),
            size: "GG".to_string(),
        };
        assert_eq!(err.to_string(), "Flamengo 2024 is out of stock in size GG");

        let err = CoreError::BelowMinimumQuantity {
            required: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Checkout requires at least 5 items, cart has 3"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "street".to_string(),
        };
        assert_eq!(err.to_string(), "street is required");

        let err = ValidationError::InvalidFormat {
            field: "cep".to_string(),
            reason: "must have 8 digits".to_string(),
        };
        assert_eq!(err.to_string(), "cep has invalid format: must have 8 digits");
    }

    #[test]
    fn test_validation_wraps_transparently() {
        let core_err: CoreError = ValidationError::NotAllowed {
            field: "size".to_string(),
            allowed: vec!["P".to_string(), "M".to_string()],
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "size must be one of: P, M");
    }
}
