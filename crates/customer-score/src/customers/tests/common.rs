use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::customers::domain::{Customer, CustomerId, CustomerRecord};
use crate::customers::memory::InMemoryCustomerRepository;
use crate::customers::repository::{CustomerRepository, RepositoryError, UniqueField};
use crate::customers::{customer_router, CustomerService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub(super) fn customer() -> Customer {
    Customer {
        name: "Ana Pereira".to_string(),
        birth_date: date(1990, 5, 17),
        tax_id: "123.456.789-09".to_string(),
        email: "ana.pereira@example.com".to_string(),
        annual_income: dec!(85000),
        address: "Avenida Paulista, 1000".to_string(),
        city: "Sao Paulo".to_string(),
        state: "SP".to_string(),
        postal_code: "01310100".to_string(),
        area_code: "11".to_string(),
        phone: "987654321".to_string(),
    }
}

pub(super) fn second_customer() -> Customer {
    Customer {
        name: "Bruno Lima".to_string(),
        birth_date: date(2003, 1, 2),
        tax_id: "52998224725".to_string(),
        email: "bruno@example.com".to_string(),
        annual_income: dec!(42000),
        address: "Rua XV de Novembro, 50".to_string(),
        city: "Curitiba".to_string(),
        state: "PR".to_string(),
        postal_code: "80020310".to_string(),
        area_code: "41".to_string(),
        phone: "33224455".to_string(),
    }
}

pub(super) fn build_service() -> (
    CustomerService<InMemoryCustomerRepository>,
    Arc<InMemoryCustomerRepository>,
) {
    let repository = Arc::new(InMemoryCustomerRepository::default());
    let service = CustomerService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(
    service: CustomerService<InMemoryCustomerRepository>,
) -> axum::Router {
    customer_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl CustomerRepository for UnavailableRepository {
    fn insert(&self, _customer: Customer) -> Result<CustomerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_by_tax_id(&self, _tax_id: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_by_email(&self, _email: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_state(&self, _state: &str) -> Result<Vec<CustomerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CustomerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: CustomerId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Accepts lookups but reports a conflict on every insert, as a racing writer would.
pub(super) struct ConflictRepository(pub(super) UniqueField);

impl CustomerRepository for ConflictRepository {
    fn insert(&self, _customer: Customer) -> Result<CustomerRecord, RepositoryError> {
        Err(RepositoryError::Conflict(self.0))
    }

    fn all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn fetch(&self, _id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        Ok(None)
    }

    fn fetch_by_tax_id(&self, _tax_id: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        Ok(None)
    }

    fn fetch_by_email(&self, _email: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        Ok(None)
    }

    fn by_state(&self, _state: &str) -> Result<Vec<CustomerRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn update(&self, _record: CustomerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn delete(&self, _id: CustomerId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
