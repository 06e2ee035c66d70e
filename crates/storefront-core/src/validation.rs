//! # Validation Module
//!
//! Checkout form validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shipping form ──► validate_shipping_info() ──► FieldErrors            │
//! │                                                                         │
//! │  FieldErrors is a map: field → message, rendered next to each input.   │
//! │  Empty map = form is valid, the wizard may leave step 1.               │
//! │                                                                         │
//! │  Nothing here panics or short-circuits: every field is checked so the  │
//! │  user sees all problems at once.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checkout::ShippingInfo;
use crate::error::ValidationError;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Something, an @, something, a dot, something. No whitespace anywhere.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// =============================================================================
// Field Errors
// =============================================================================

/// Per-field validation messages, keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Comma-separated field names, for log lines and error messages.
    pub fn summary(&self) -> String {
        self.0.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotAllowed { field, .. } => field.clone(),
        };
        let mut errors = FieldErrors::new();
        errors.insert(field, err.to_string());
        errors
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Fails if the trimmed value is empty.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Checks an email address against a basic `local@domain.tld` pattern.
///
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("budi@example.com").is_ok());
/// assert!(validate_email("budi@example").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;

    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates the shipping step of checkout.
///
/// ## Required
/// first name, last name, email (format checked), phone, address, city, zip.
/// Province and notes are optional.
pub fn validate_shipping_info(info: &ShippingInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required: [(&str, &str, &str); 6] = [
        ("firstName", info.first_name.as_str(), "First name is required"),
        ("lastName", info.last_name.as_str(), "Last name is required"),
        ("phone", info.phone.as_str(), "Phone number is required"),
        ("address", info.address.as_str(), "Address is required"),
        ("city", info.city.as_str(), "City is required"),
        ("zipCode", info.zip_code.as_str(), "ZIP code is required"),
    ];

    for (field, value, message) in required {
        if validate_required(field, value).is_err() {
            errors.insert(field, message);
        }
    }

    match validate_email(&info.email) {
        Ok(()) => {}
        Err(ValidationError::Required { .. }) => errors.insert("email", "Email is required"),
        Err(_) => errors.insert("email", "Email is invalid"),
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ShippingInfo {
        ShippingInfo {
            first_name: "Budi".to_string(),
            last_name: "Santoso".to_string(),
            email: "budi@example.com".to_string(),
            phone: "081234567890".to_string(),
            address: "Jl. Merdeka No. 1".to_string(),
            city: "Bandung".to_string(),
            province: None,
            zip_code: "40111".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_complete_form_has_no_errors() {
        assert!(validate_shipping_info(&complete_form()).is_empty());
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let errors = validate_shipping_info(&ShippingInfo::default());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert!(errors.contains("zipCode"));
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = complete_form();
        form.city = "   ".to_string();
        let errors = validate_shipping_info(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("city"), Some("City is required"));
    }

    #[test]
    fn test_malformed_email() {
        for bad in ["budi", "budi@", "budi@example", "bu di@example.com", "@example.com"] {
            let mut form = complete_form();
            form.email = bad.to_string();
            let errors = validate_shipping_info(&form);
            assert_eq!(errors.get("email"), Some("Email is invalid"), "{bad}");
        }
    }

    #[test]
    fn test_field_errors_summary() {
        let mut errors = FieldErrors::new();
        errors.insert("phone", "Phone number is required");
        errors.insert("city", "City is required");
        assert_eq!(errors.summary(), "city, phone");
    }
}
