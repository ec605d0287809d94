use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::domain::{Customer, CustomerId, CustomerRecord, CustomerUpdate, ProfileViolation};
use super::repository::{CustomerRepository, RepositoryError, UniqueField};
use super::scoring::{score_breakdown, ScoreBreakdown};
use super::validation::{normalize_tax_id, validate_fields, FieldViolation};

/// Service composing field validation, uniqueness checks, storage and scoring.
pub struct CustomerService<R> {
    repository: Arc<R>,
}

impl<R> CustomerService<R>
where
    R: CustomerRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new customer. The tax id is stored as bare digits.
    pub fn register(
        &self,
        mut customer: Customer,
    ) -> Result<CustomerRecord, CustomerServiceError> {
        if let Err(violation) = validate_fields(&customer.field_set()) {
            warn!(field = violation.field(), "customer registration rejected");
            return Err(violation.into());
        }
        if let Err(violation) = customer.check_profile() {
            warn!(field = violation.field(), "customer registration rejected");
            return Err(violation.into());
        }

        customer.tax_id = customer.normalized_tax_id();

        if self.repository.fetch_by_tax_id(&customer.tax_id)?.is_some() {
            return Err(CustomerServiceError::DuplicateTaxId);
        }
        if self.repository.fetch_by_email(&customer.email)?.is_some() {
            return Err(CustomerServiceError::DuplicateEmail);
        }

        let record = self.repository.insert(customer)?;

        info!(customer_id = %record.id, state = %record.customer.state, "customer registered");
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<CustomerRecord>, CustomerServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn get(&self, id: CustomerId) -> Result<CustomerRecord, CustomerServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(CustomerServiceError::NotFound)
    }

    /// Look up by tax id, with or without formatting punctuation.
    pub fn find_by_tax_id(&self, tax_id: &str) -> Result<CustomerRecord, CustomerServiceError> {
        self.repository
            .fetch_by_tax_id(&normalize_tax_id(tax_id))?
            .ok_or(CustomerServiceError::NotFound)
    }

    pub fn find_by_email(&self, email: &str) -> Result<CustomerRecord, CustomerServiceError> {
        self.repository
            .fetch_by_email(email)?
            .ok_or(CustomerServiceError::NotFound)
    }

    pub fn list_by_state(
        &self,
        state: &str,
    ) -> Result<Vec<CustomerRecord>, CustomerServiceError> {
        Ok(self.repository.by_state(state)?)
    }

    /// Apply a partial update after validating only the supplied fields.
    pub fn update(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomerServiceError> {
        let mut record = self.get(id)?;

        if let Err(violation) = validate_fields(&update.field_set()) {
            warn!(customer_id = %id, field = violation.field(), "customer update rejected");
            return Err(violation.into());
        }
        if let Err(violation) = update.check_profile() {
            warn!(customer_id = %id, field = violation.field(), "customer update rejected");
            return Err(violation.into());
        }

        if let Some(email) = update.email.as_deref() {
            if let Some(owner) = self.repository.fetch_by_email(email)? {
                if owner.id != id {
                    return Err(CustomerServiceError::DuplicateEmail);
                }
            }
        }

        if update.is_empty() {
            debug!(customer_id = %id, "empty customer update ignored");
            return Ok(record);
        }

        update.apply_to(&mut record.customer);
        self.repository.update(record.clone())?;

        info!(customer_id = %id, "customer updated");
        Ok(record)
    }

    pub fn delete(&self, id: CustomerId) -> Result<(), CustomerServiceError> {
        self.get(id)?;
        self.repository.delete(id)?;
        info!(customer_id = %id, "customer removed");
        Ok(())
    }

    /// Score the customer owning `tax_id` as of `today`. Never stored.
    pub fn score(
        &self,
        tax_id: &str,
        today: NaiveDate,
    ) -> Result<ScoreBreakdown, CustomerServiceError> {
        let record = self.find_by_tax_id(tax_id)?;
        let breakdown = score_breakdown(
            record.customer.annual_income,
            record.customer.birth_date,
            today,
        );
        debug!(customer_id = %record.id, total = breakdown.total, %today, "score computed");
        Ok(breakdown)
    }
}

/// Error raised by the customer service.
#[derive(Debug, thiserror::Error)]
pub enum CustomerServiceError {
    #[error(transparent)]
    Validation(#[from] FieldViolation),
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error("tax id already registered")]
    DuplicateTaxId,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("customer not found")]
    NotFound,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CustomerServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(UniqueField::TaxId) => Self::DuplicateTaxId,
            RepositoryError::Conflict(UniqueField::Email) => Self::DuplicateEmail,
            other => Self::Repository(other),
        }
    }
}
