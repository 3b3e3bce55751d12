//! REST routes for operators and transactions
//!
//! Drafts deserialize straight from the request body; stored records
//! serialize straight back out. All domain errors surface through
//! [`ApiError`] with the request path attached.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use desk_core::{Operator, OperatorDraft, Transaction, TransactionDraft};
use serde::Serialize;
use uuid::Uuid;

/// Health probe body
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/operators", get(list_operators).post(create_operator))
        .route(
            "/operators/:id",
            get(get_operator).put(update_operator).delete(delete_operator),
        )
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:id",
            get(get_transaction).delete(delete_transaction),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "UP",
        service: "desk-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn create_operator(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(draft): Json<OperatorDraft>,
) -> Result<(StatusCode, Json<Operator>), ApiError> {
    let operator = state
        .operators
        .create(draft)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok((StatusCode::CREATED, Json(operator)))
}

async fn list_operators(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let operators = state
        .operators
        .list()
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(Json(operators))
}

async fn get_operator(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<Json<Operator>, ApiError> {
    let operator = state
        .operators
        .get(id)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(Json(operator))
}

async fn update_operator(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
    Json(draft): Json<OperatorDraft>,
) -> Result<Json<Operator>, ApiError> {
    let operator = state
        .operators
        .update(id, draft)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(Json(operator))
}

async fn delete_operator(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .operators
        .delete(id)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(draft): Json<TransactionDraft>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state
        .transactions
        .create(draft)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn list_transactions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .transactions
        .list()
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(Json(transactions))
}

async fn get_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .transactions
        .get(id)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .transactions
        .delete(id)
        .map_err(|e| ApiError::from_domain(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use desk_core::MemoryStore;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = MemoryStore::new();
        router(AppState::with_stores(
            Arc::new(store.clone()),
            Arc::new(store),
        ))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let app = app();

        // Operator comes in display-formatted and lower-cased, is stored
        // normalized and canonicalized
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/operators",
                json!({"name": "Ana Silva", "cpf": "123.456.789-09", "shift": "manha"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let operator = body_json(response).await;
        assert_eq!(operator["name"], "Ana Silva");
        assert_eq!(operator["cpf"], "12345678909");
        assert_eq!(operator["shift"], "MANHA");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/transactions",
                json!({"amount": 450.00, "payment_method": "cartao"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let transaction = body_json(response).await;
        assert_eq!(transaction["payment_method"], "CARTAO");
        assert_eq!(transaction["fraud_risk"], "MEDIUM");
        assert_eq!(transaction["amount"], "450.00");
        assert!(transaction["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_cpf_returns_business_error() {
        let app = app();
        let payload = json!({"name": "Ana Silva", "cpf": "12345678909", "shift": "manha"});

        let response = app
            .clone()
            .oneshot(json_request("POST", "/operators", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/operators", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Business Error");
        assert_eq!(body["path"], "/operators");
    }

    #[tokio::test]
    async fn test_validation_error_lists_all_messages() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/operators",
                json!({"name": "Jo", "cpf": "000", "shift": "madrugada"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Validation Error");
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_operator_is_404() {
        let app = app();
        let id = Uuid::new_v4();

        for request in [
            Request::builder()
                .method("GET")
                .uri(format!("/operators/{id}"))
                .body(Body::empty())
                .unwrap(),
            Request::builder()
                .method("DELETE")
                .uri(format!("/operators/{id}"))
                .body(Body::empty())
                .unwrap(),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let body = body_json(response).await;
            assert_eq!(body["title"], "Resource Not Found");
            assert_eq!(body["path"], format!("/operators/{id}"));
        }
    }

    #[tokio::test]
    async fn test_operator_update_and_delete() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/operators",
                json!({"name": "Ana Silva", "cpf": "12345678909", "shift": "manha"}),
            ))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        // Resubmitting the own CPF on update does not conflict
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/operators/{id}"),
                json!({"name": "Ana S. Ramos", "cpf": "123.456.789-09", "shift": "noite"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["shift"], "NOITE");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/operators/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/operators/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_transaction_amount_as_string_also_accepted() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/transactions",
                json!({"amount": "99.99", "payment_method": "cartao"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["fraud_risk"], "LOW");
    }

    #[tokio::test]
    async fn test_transaction_has_no_update_route() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/transactions",
                json!({"amount": 10.00, "payment_method": "pix"}),
            ))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/transactions/{id}"),
                json!({"amount": 600.00, "payment_method": "cartao"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_invalid_transaction_payload() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/transactions",
                json!({"amount": -5.00, "payment_method": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Validation Error");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "UP");
    }
}
