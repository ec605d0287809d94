use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{Customer, CustomerId, CustomerUpdate};
use super::repository::CustomerRepository;
use super::scoring::{AgeBracket, IncomeBracket};
use super::service::{CustomerService, CustomerServiceError};

/// Router builder exposing the customer registration and scoring endpoints.
pub fn customer_router<R>(service: Arc<CustomerService<R>>) -> Router
where
    R: CustomerRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/customers",
            get(list_handler::<R>).post(register_handler::<R>),
        )
        .route(
            "/api/v1/customers/:id",
            get(get_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/customers/tax-id/:tax_id",
            get(tax_id_handler::<R>),
        )
        .route("/api/v1/customers/email/:email", get(email_handler::<R>))
        .route("/api/v1/customers/state/:state", get(state_handler::<R>))
        .route("/api/v1/customers/score/:tax_id", get(score_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub tax_id: String,
    pub score: u16,
    pub income_bracket: IncomeBracket,
    pub income_points: u16,
    pub age: i32,
    pub age_bracket: AgeBracket,
    pub age_points: u16,
    pub today: NaiveDate,
}

fn error_response(error: CustomerServiceError) -> Response {
    let (status, payload) = match &error {
        CustomerServiceError::Validation(violation) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": violation.to_string(), "field": violation.field() }),
        ),
        CustomerServiceError::Profile(violation) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": violation.to_string(), "field": violation.field() }),
        ),
        CustomerServiceError::DuplicateTaxId | CustomerServiceError::DuplicateEmail => {
            (StatusCode::CONFLICT, json!({ "error": error.to_string() }))
        }
        CustomerServiceError::NotFound => {
            (StatusCode::NOT_FOUND, json!({ "error": error.to_string() }))
        }
        CustomerServiceError::Repository(source) => {
            error!(%source, "customer repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": error.to_string() }),
            )
        }
    };

    (status, Json(payload)).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, CustomerServiceError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Json(customer): Json<Customer>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::CREATED, service.register(customer))
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CustomerService<R>>>) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.list())
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.get(CustomerId(id)))
}

pub(crate) async fn tax_id_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(tax_id): Path<String>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.find_by_tax_id(&tax_id))
}

pub(crate) async fn email_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(email): Path<String>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.find_by_email(&email))
}

pub(crate) async fn state_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(state): Path<String>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.list_by_state(&state))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(id): Path<u64>,
    Json(update): Json<CustomerUpdate>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    respond(StatusCode::OK, service.update(CustomerId(id), update))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    match service.delete(CustomerId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<CustomerService<R>>>,
    Path(tax_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Response
where
    R: CustomerRepository + 'static,
{
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let result = service.score(&tax_id, today).map(|breakdown| ScoreResponse {
        tax_id,
        score: breakdown.total,
        income_bracket: breakdown.income_bracket,
        income_points: breakdown.income_points,
        age: breakdown.age,
        age_bracket: breakdown.age_bracket,
        age_points: breakdown.age_points,
        today,
    });
    respond(StatusCode::OK, result)
}
