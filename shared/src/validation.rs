//! Form validation helpers
//!
//! Field formats shared by the create/update payloads, plus a wrapper that
//! turns `validator` output into a stable, human-readable message.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Mexican tax id (RFC), legal entities and individuals
pub static TAX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-ZÑ&]{3,4}\d{6}[A-Z0-9]{3}$").expect("tax id pattern"));

/// Ten digit phone number, no separators
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern"));

/// Product SKU
pub static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]{3,20}$").expect("sku pattern"));

/// Form validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormError {
    /// Offending fields, sorted
    pub fields: Vec<String>,
    /// `field: code` pairs joined with `; `
    pub message: String,
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        let mut entries: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes = errs
                    .iter()
                    .map(|e| e.code.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                (field.to_string(), codes)
            })
            .collect();
        entries.sort();

        let message = entries
            .iter()
            .map(|(field, codes)| format!("{}: {}", field, codes))
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            fields: entries.into_iter().map(|(field, _)| field).collect(),
            message,
        }
    }
}

/// Run `validator` on a form and convert the failure
pub fn validate_form<T: Validate>(form: &T) -> Result<(), FormError> {
    form.validate().map_err(FormError::from)
}

/// Check an optional phone value against [`PHONE_RE`]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
