use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{normalize_tax_id, FieldSet};

/// Sequential identifier assigned when a customer is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer data captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub birth_date: NaiveDate,
    pub tax_id: String,
    pub email: String,
    pub annual_income: Decimal,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub area_code: String,
    pub phone: String,
}

impl Customer {
    /// Every validated field is present on a full registration.
    pub fn field_set(&self) -> FieldSet<'_> {
        FieldSet {
            state: Some(&self.state),
            postal_code: Some(&self.postal_code),
            area_code: Some(&self.area_code),
            phone: Some(&self.phone),
            tax_id: Some(&self.tax_id),
            email: Some(&self.email),
        }
    }

    /// Tax id reduced to its digits, the form used for storage and lookups.
    pub fn normalized_tax_id(&self) -> String {
        normalize_tax_id(&self.tax_id)
    }

    /// Required text must not be blank and income must not be negative.
    pub fn check_profile(&self) -> Result<(), ProfileViolation> {
        require_text(&self.name, ProfileViolation::MissingName)?;
        require_text(&self.address, ProfileViolation::MissingAddress)?;
        require_text(&self.city, ProfileViolation::MissingCity)?;
        check_income(self.annual_income)
    }
}

/// Partial update. Name, birth date and tax id cannot be changed after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerUpdate {
    pub email: Option<String>,
    pub annual_income: Option<Decimal>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub area_code: Option<String>,
    pub phone: Option<String>,
}

impl CustomerUpdate {
    pub fn field_set(&self) -> FieldSet<'_> {
        FieldSet {
            state: self.state.as_deref(),
            postal_code: self.postal_code.as_deref(),
            area_code: self.area_code.as_deref(),
            phone: self.phone.as_deref(),
            tax_id: None,
            email: self.email.as_deref(),
        }
    }

    /// Same rules as [`Customer::check_profile`], applied to supplied fields only.
    pub fn check_profile(&self) -> Result<(), ProfileViolation> {
        if let Some(address) = self.address.as_deref() {
            require_text(address, ProfileViolation::MissingAddress)?;
        }
        if let Some(city) = self.city.as_deref() {
            require_text(city, ProfileViolation::MissingCity)?;
        }
        match self.annual_income {
            Some(income) => check_income(income),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy every supplied field onto `customer`, leaving the rest untouched.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(annual_income) = self.annual_income {
            customer.annual_income = annual_income;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
        if let Some(city) = self.city {
            customer.city = city;
        }
        if let Some(state) = self.state {
            customer.state = state;
        }
        if let Some(postal_code) = self.postal_code {
            customer.postal_code = postal_code;
        }
        if let Some(area_code) = self.area_code {
            customer.area_code = area_code;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
    }
}

/// Profile rule broken by a registration or update, outside the structural field checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("name is required")]
    MissingName,
    #[error("address is required")]
    MissingAddress,
    #[error("city is required")]
    MissingCity,
    #[error("annual income must not be negative")]
    NegativeIncome,
}

impl ProfileViolation {
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingAddress => "address",
            Self::MissingCity => "city",
            Self::NegativeIncome => "annual_income",
        }
    }
}

fn require_text(value: &str, violation: ProfileViolation) -> Result<(), ProfileViolation> {
    if value.trim().is_empty() {
        Err(violation)
    } else {
        Ok(())
    }
}

fn check_income(income: Decimal) -> Result<(), ProfileViolation> {
    if income < Decimal::ZERO {
        Err(ProfileViolation::NegativeIncome)
    } else {
        Ok(())
    }
}

/// Stored customer together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    #[serde(flatten)]
    pub customer: Customer,
}
