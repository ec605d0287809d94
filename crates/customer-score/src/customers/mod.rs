//! Customer registration, field validation and credit scoring.
//!
//! `validation` and `scoring` are pure and never touch storage. The service layers
//! uniqueness checks and persistence on top of them through [`CustomerRepository`].

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Customer, CustomerId, CustomerRecord, CustomerUpdate, ProfileViolation};
pub use memory::InMemoryCustomerRepository;
pub use repository::{CustomerRepository, RepositoryError, UniqueField};
pub use router::{customer_router, ScoreResponse};
pub use scoring::{
    age_on, calculate_score, score_breakdown, AgeBracket, IncomeBracket, ScoreBreakdown,
};
pub use service::{CustomerService, CustomerServiceError};
pub use validation::{
    is_valid_email, is_valid_tax_id, validate_fields, FieldSet, FieldViolation, ValidationVerdict,
};
