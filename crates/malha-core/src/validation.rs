//! # Validation Module
//!
//! Input validation for cart edits and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web frontend                                                 │
//! │  ├── required inputs, maxLength on CEP/state                           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront (Rust)                                            │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: checkout and cart rules                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted store                                                 │
//! │  └── Column constraints                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine is deliberately NOT behind these checks: it prices
//! whatever it is given.
//!
//! ## Usage
//! ```rust
//! use malha_core::validation::{normalize_cep, validate_quantity};
//!
//! assert_eq!(normalize_cep("01310-100").unwrap(), "01310100");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::PaymentMethod;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Digits in a Brazilian postal code.
pub const CEP_DIGITS: usize = 8;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects blank values and returns the trimmed text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Validates the shape of an e-mail address (`local@domain.tld`).
///
/// ```rust
/// use malha_core::validation::validate_email;
///
/// assert!(validate_email("torcedor@malha.pro").is_ok());
/// assert!(validate_email("torcedor@").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(email)
}

/// Strips punctuation from a CEP and requires exactly 8 digits.
///
/// ```rust
/// use malha_core::validation::normalize_cep;
///
/// assert_eq!(normalize_cep("20271-130").unwrap(), "20271130");
/// assert_eq!(normalize_cep(" 20271130 ").unwrap(), "20271130");
/// assert!(normalize_cep("2027-113").is_err());
/// ```
pub fn normalize_cep(cep: &str) -> ValidationResult<String> {
    let digits: String = cep.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "cep".to_string(),
        });
    }

    if digits.len() != CEP_DIGITS {
        return Err(ValidationError::InvalidFormat {
            field: "cep".to_string(),
            reason: format!("must have {} digits", CEP_DIGITS),
        });
    }

    Ok(digits)
}

/// Renders bare CEP digits as `12345-678`; anything else is returned unchanged.
pub fn format_cep(cep: &str) -> String {
    if cep.len() == CEP_DIGITS && cep.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", &cep[..5], &cep[5..])
    } else {
        cep.to_string()
    }
}

/// Validates a two-letter state code (UF) and returns it uppercased.
pub fn validate_state(state: &str) -> ValidationResult<String> {
    let state = validate_required("state", state)?;

    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "state".to_string(),
            reason: "must be a two-letter code".to_string(),
        });
    }

    Ok(state.to_ascii_uppercase())
}

/// Validates a catalog search query.
///
/// Empty is allowed (lists everything); at most 100 characters.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a user id handed out by the auth provider (UUID).
pub fn validate_user_id(id: &str) -> ValidationResult<()> {
    validate_required("user_id", id)?;

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "user_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_ITEM_QUANTITY`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in centavos. Zero is allowed.
///
/// ```rust
/// use malha_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(5997).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Only methods the storefront can currently settle are accepted.
pub fn validate_payment_method(method: PaymentMethod) -> ValidationResult<()> {
    if !method.is_available() {
        return Err(ValidationError::NotAllowed {
            field: "payment_method".to_string(),
            allowed: vec!["pix".to_string()],
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "  Ana  ").unwrap(), "Ana");
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.silva+loja@mail.com.br").is_ok());

        assert!(validate_email("ana").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("ana@@example.com").is_err());
        assert!(validate_email("ana silva@example.com").is_err());
        assert!(validate_email("ana@.com").is_err());
    }

    #[test]
    fn test_normalize_cep() {
        assert_eq!(normalize_cep("01310-100").unwrap(), "01310100");
        assert_eq!(normalize_cep("01.310-100").unwrap(), "01310100");

        assert!(matches!(
            normalize_cep(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            normalize_cep("0131010"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(normalize_cep("013101000").is_err());
    }

    #[test]
    fn test_format_cep() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("0131"), "0131");
    }

    #[test]
    fn test_validate_state() {
        assert_eq!(validate_state("rj").unwrap(), "RJ");
        assert!(validate_state("RJX").is_err());
        assert!(validate_state("R1").is_err());
        assert!(validate_state("").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  flamengo ").unwrap(), "flamengo");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_payment_method() {
        assert!(validate_payment_method(PaymentMethod::Pix).is_ok());
        assert!(validate_payment_method(PaymentMethod::CreditCard).is_err());
    }
}
