use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{Customer, CustomerId, CustomerRecord};
use super::repository::{CustomerRepository, RepositoryError, UniqueField};

#[derive(Default)]
struct Store {
    last_id: u64,
    records: BTreeMap<CustomerId, CustomerRecord>,
}

impl Store {
    /// First unique attribute of `customer` already held by a record other than `owner`.
    fn collision(&self, customer: &Customer, owner: Option<CustomerId>) -> Option<UniqueField> {
        let others = || {
            self.records
                .values()
                .filter(move |record| Some(record.id) != owner)
        };
        if others().any(|record| record.customer.tax_id == customer.tax_id) {
            return Some(UniqueField::TaxId);
        }
        if others().any(|record| record.customer.email == customer.email) {
            return Some(UniqueField::Email);
        }
        None
    }
}

/// Process-local repository backing the HTTP service and tests. Records are lost on restart.
#[derive(Default, Clone)]
pub struct InMemoryCustomerRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryCustomerRepository {
    pub fn len(&self) -> usize {
        self.store
            .lock()
            .expect("repository mutex poisoned")
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn insert(&self, customer: Customer) -> Result<CustomerRecord, RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if let Some(field) = store.collision(&customer, None) {
            return Err(RepositoryError::Conflict(field));
        }

        store.last_id += 1;
        let record = CustomerRecord {
            id: CustomerId(store.last_id),
            customer,
        };
        store.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.records.values().cloned().collect())
    }

    fn fetch(&self, id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.records.get(&id).cloned())
    }

    fn fetch_by_tax_id(&self, tax_id: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .records
            .values()
            .find(|record| record.customer.tax_id == tax_id)
            .cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .records
            .values()
            .find(|record| record.customer.email == email)
            .cloned())
    }

    fn by_state(&self, state: &str) -> Result<Vec<CustomerRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .records
            .values()
            .filter(|record| record.customer.state == state)
            .cloned()
            .collect())
    }

    fn update(&self, record: CustomerRecord) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if let Some(field) = store.collision(&record.customer, Some(record.id)) {
            return Err(RepositoryError::Conflict(field));
        }
        match store.records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        store
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
