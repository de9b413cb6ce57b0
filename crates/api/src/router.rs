use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{self, AppState};
use crate::auth_handlers;

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Auth endpoints
        .route("/api/auth/register", post(auth_handlers::register))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/me", get(auth_handlers::me))
        // Questionnaire endpoints
        .route("/api/questionnaire", post(handlers::save_questionnaire))
        .route("/api/questionnaire", get(handlers::get_questionnaire))
        .route("/api/questionnaire", delete(handlers::delete_questionnaire))
        // Transaction endpoints
        .route("/api/transactions", post(handlers::create_transaction))
        .route("/api/transactions", get(handlers::list_transactions))
        .route(
            "/api/transactions/:transaction_id",
            delete(handlers::delete_transaction),
        )
        // Report endpoints
        .route("/api/reports/health-score", get(handlers::health_score))
        .route("/api/reports/health-profile", get(handlers::health_profile))
        .route("/api/reports/pl", get(handlers::pl_statement))
        .route("/api/reports/balance-sheet", get(handlers::balance_sheet))
        // Shared repository state
        .with_state(state)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FileDatabase;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_app() -> (Router, PathBuf) {
        let path =
            std::env::temp_dir().join(format!("finprofile-router-{}.json", Uuid::new_v4()));
        let db = Arc::new(FileDatabase::new(&path));
        let state = AppState {
            users: db.clone(),
            sessions: db.clone(),
            profiles: db.clone(),
            transactions: db,
        };
        (create_router(state), path)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_with(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/register",
                None,
                json!({
                    "email": "ravi@example.com",
                    "password": "s3cret",
                    "name": "Ravi",
                    "mobile_number": "9999999999",
                    "age": 30,
                    "city": "Pune",
                    "marital_status": "Single",
                    "no_of_dependents": 0,
                    "data_privacy_consent": true
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, path) = test_app();
        let (status, body) = send(&app, get_with("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_protected_routes_require_a_token() {
        let (app, path) = test_app();
        let (status, _) = send(&app, get_with("/api/questionnaire", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, get_with("/api/auth/me", Some("bogus"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let (app, path) = test_app();
        let _ = register(&app).await;
        let (status, _) = send(
            &app,
            post_json(
                "/api/auth/register",
                None,
                json!({
                    "email": "ravi@example.com",
                    "password": "other",
                    "name": "Ravi",
                    "mobile_number": "9999999999",
                    "age": 30,
                    "city": "Pune",
                    "marital_status": "Single",
                    "no_of_dependents": 0,
                    "data_privacy_consent": true
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_questionnaire_lifecycle_and_derived_networth() {
        let (app, path) = test_app();
        let token = register(&app).await;

        // Nothing saved yet.
        let (status, _) = send(&app, get_with("/api/questionnaire", Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Save: vehicle insurance seeds the vehicle list on the way in.
        let (status, body) = send(
            &app,
            post_json(
                "/api/questionnaire",
                Some(&token),
                json!({
                    "salary_income": 1200000,
                    "bank_balance": 100000,
                    "credit_card_outstanding": 25000,
                    "loans": [{
                        "loan_type": "Home",
                        "name": "Home Loan",
                        "principal_amount": 120000,
                        "interest_rate": 12,
                        "tenure_months": 12
                    }],
                    "insurance_policies": [{
                        "type": "vehicle",
                        "insurance_amount": 8000,
                        "vehicle_type": "4-wheeler",
                        "vehicle_number": "mh02ab1234"
                    }]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "save failed: {body}");
        let saved = &body["questionnaire"];
        assert_eq!(saved["vehicles"].as_array().unwrap().len(), 1);
        assert_eq!(saved["vehicles"][0]["registration_number"], "MH02AB1234");
        assert_eq!(saved["vehicles"][0]["is_insured"], true);

        // Net worth on /me is derived: 100000 bank - 145000 owed.
        let (status, body) = send(&app, get_with("/api/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["networth"].as_f64().unwrap(), -45_000.0);

        // Reset is atomic and repeatable.
        let (status, _) = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/api/questionnaire")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, get_with("/api/questionnaire", Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = send(&app, get_with("/api/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["networth"].as_f64().unwrap(), 0.0);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_transactions_and_reports_flow() {
        let (app, path) = test_app();
        let token = register(&app).await;

        let (status, created) = send(
            &app,
            post_json(
                "/api/transactions",
                Some(&token),
                json!({
                    "amount": 10000,
                    "type": "income",
                    "category": "Salary",
                    "description": "May salary",
                    "date": "2025-05-01"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let transaction_id = created["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            post_json(
                "/api/transactions",
                Some(&token),
                json!({
                    "amount": 7000,
                    "type": "expense",
                    "category": "Rent",
                    "description": "May rent",
                    "date": "2025-05-02"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, listed) = send(&app, get_with("/api/transactions?limit=1", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, score) = send(&app, get_with("/api/reports/health-score", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(score["score"].as_u64().unwrap(), 90);

        let (status, pl) = send(&app, get_with("/api/reports/pl", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pl["net_profit_loss"].as_f64().unwrap(), 3_000.0);
        assert_eq!(pl["monthly_trend"][0]["month"], "2025-05");

        // Balance sheet with no saved profile is all zeros, never an error.
        let (status, sheet) =
            send(&app, get_with("/api/reports/balance-sheet", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["net_worth"].as_f64().unwrap(), 0.0);

        let (status, _) = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{transaction_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Second delete of the same id is a 404.
        let (status, _) = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{transaction_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let _ = std::fs::remove_file(path);
    }
}
