//! End-to-end registration scenarios driven through the HTTP router, the way the
//! service binary mounts it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use customer_score::customers::{
    customer_router, CustomerService, InMemoryCustomerRepository, ScoreResponse,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> axum::Router {
    let repository = Arc::new(InMemoryCustomerRepository::default());
    customer_router(Arc::new(CustomerService::new(repository)))
}

fn registration(tax_id: &str, email: &str) -> Value {
    json!({
        "name": "Carla Mendes",
        "birth_date": "1985-07-30",
        "tax_id": tax_id,
        "email": email,
        "annual_income": 125000.5,
        "address": "Rua da Praia, 12",
        "city": "Porto Alegre",
        "state": "RS",
        "postal_code": "90010000",
        "area_code": "51",
        "phone": "998877665"
    })
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

async fn send(router: &axum::Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

#[tokio::test]
async fn register_score_update_and_delete() {
    let router = router();

    let created = send(
        &router,
        request(
            Method::POST,
            "/api/v1/customers",
            Some(registration("529.982.247-25", "carla@example.com")),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    let id = created["id"].as_u64().expect("numeric id");
    assert_eq!(created["tax_id"], "52998224725");

    let scored = send(
        &router,
        request(
            Method::GET,
            "/api/v1/customers/score/52998224725?today=2026-10-19",
            None,
        ),
    )
    .await;
    assert_eq!(scored.status(), StatusCode::OK);
    let scored: ScoreResponse =
        serde_json::from_value(body_json(scored).await).expect("score payload");
    assert_eq!(scored.age, 41);
    assert_eq!(scored.score, 500);

    let updated = send(
        &router,
        request(
            Method::PATCH,
            &format!("/api/v1/customers/{id}"),
            Some(json!({ "annual_income": "45000" })),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let rescored = send(
        &router,
        request(
            Method::GET,
            "/api/v1/customers/score/529.982.247-25?today=2026-10-19",
            None,
        ),
    )
    .await;
    let rescored = body_json(rescored).await;
    assert_eq!(rescored["score"], 300);

    let deleted = send(
        &router,
        request(Method::DELETE, &format!("/api/v1/customers/{id}"), None),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send(
        &router,
        request(Method::GET, "/api/v1/customers/score/52998224725", None),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_tax_id_and_email_are_rejected() {
    let router = router();

    let first = send(
        &router,
        request(
            Method::POST,
            "/api/v1/customers",
            Some(registration("11144477735", "first@example.com")),
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let same_tax_id = send(
        &router,
        request(
            Method::POST,
            "/api/v1/customers",
            Some(registration("111.444.777-35", "second@example.com")),
        ),
    )
    .await;
    assert_eq!(same_tax_id.status(), StatusCode::CONFLICT);

    let same_email = send(
        &router,
        request(
            Method::POST,
            "/api/v1/customers",
            Some(registration("39053344705", "first@example.com")),
        ),
    )
    .await;
    assert_eq!(same_email.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(same_email).await["error"], "email already registered");
}

#[tokio::test]
async fn invalid_registration_reports_first_violation() {
    let router = router();
    let mut payload = registration("12345678900", "not an email");
    payload["state"] = json!("Rio Grande do Sul");

    let response = send(
        &router,
        request(Method::POST, "/api/v1/customers", Some(payload)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid tax id");
    assert_eq!(body["field"], "tax_id");
}
