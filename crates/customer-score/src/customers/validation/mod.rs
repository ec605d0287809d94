//! Structural validation of customer fields.
//!
//! Every rule is purely syntactic: nothing here talks to storage or to an external registry.
//! [`validate_fields`] runs the rules in a fixed order and reports only the first violation.

mod email;
mod fields;
mod tax_id;

pub use email::is_valid_email;
pub use fields::{is_valid_area_code, is_valid_phone, is_valid_postal_code, is_valid_state};
pub use tax_id::{check_digits, is_valid_tax_id, normalize_tax_id};

/// Optional view over the validated customer fields. `None` skips the rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet<'a> {
    pub state: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub area_code: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub tax_id: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// First rule broken by a set of customer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FieldViolation {
    #[error("invalid tax id")]
    InvalidTaxId,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid state")]
    InvalidState,
    #[error("invalid postal code")]
    InvalidPostalCode,
    #[error("invalid area code")]
    InvalidAreaCode,
    #[error("invalid phone")]
    InvalidPhone,
}

impl FieldViolation {
    /// Name of the offending field as it appears in API payloads.
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidTaxId => "tax_id",
            Self::InvalidEmail => "email",
            Self::InvalidState => "state",
            Self::InvalidPostalCode => "postal_code",
            Self::InvalidAreaCode => "area_code",
            Self::InvalidPhone => "phone",
        }
    }
}

/// `Ok(())` when every supplied field is well formed.
pub type ValidationVerdict = Result<(), FieldViolation>;

fn check(
    value: Option<&str>,
    is_valid: fn(&str) -> bool,
    violation: FieldViolation,
) -> ValidationVerdict {
    match value {
        Some(value) if !is_valid(value) => Err(violation),
        _ => Ok(()),
    }
}

// Order matters: callers rely on which violation wins when several fields are wrong.
pub fn validate_fields(fields: &FieldSet<'_>) -> ValidationVerdict {
    check(fields.tax_id, is_valid_tax_id, FieldViolation::InvalidTaxId)?;
    check(fields.email, is_valid_email, FieldViolation::InvalidEmail)?;
    check(fields.state, is_valid_state, FieldViolation::InvalidState)?;
    check(
        fields.postal_code,
        is_valid_postal_code,
        FieldViolation::InvalidPostalCode,
    )?;
    check(
        fields.area_code,
        is_valid_area_code,
        FieldViolation::InvalidAreaCode,
    )?;
    check(fields.phone, is_valid_phone, FieldViolation::InvalidPhone)
}
