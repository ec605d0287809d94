use super::domain::{Customer, CustomerId, CustomerRecord};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Tax ids reach the repository in normalized digit form. Implementations enforce tax id and
/// email uniqueness atomically with the write and report a collision as
/// [`RepositoryError::Conflict`].
pub trait CustomerRepository: Send + Sync {
    /// Store a new customer and return it with its assigned identifier.
    fn insert(&self, customer: Customer) -> Result<CustomerRecord, RepositoryError>;
    fn all(&self) -> Result<Vec<CustomerRecord>, RepositoryError>;
    fn fetch(&self, id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError>;
    fn fetch_by_tax_id(&self, tax_id: &str) -> Result<Option<CustomerRecord>, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, RepositoryError>;
    fn by_state(&self, state: &str) -> Result<Vec<CustomerRecord>, RepositoryError>;
    fn update(&self, record: CustomerRecord) -> Result<(), RepositoryError>;
    fn delete(&self, id: CustomerId) -> Result<(), RepositoryError>;
}

/// Customer attribute that must be unique across stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    TaxId,
    Email,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::TaxId => write!(f, "tax id"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} already registered")]
    Conflict(UniqueField),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
