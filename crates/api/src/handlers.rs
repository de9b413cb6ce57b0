use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use models::{FinancialProfile, Transaction, TransactionKind};

use crate::auth::authenticate;
use crate::error::{ApiError, Result};
use crate::repository::{ProfileStore, SessionStore, TransactionStore, UserStore};

/// Shared handler state: one repository trait object per concern, usually all
/// backed by the same [`crate::repository::FileDatabase`].
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---- Questionnaire ----

#[derive(Debug, Serialize)]
pub struct QuestionnaireResponse {
    pub message: String,
    pub questionnaire: FinancialProfile,
}

/// POST /api/questionnaire
/// Upserts the caller's single profile document, wholesale.
pub async fn save_questionnaire(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut profile): Json<FinancialProfile>,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;

    // Vehicle policies seed the vehicle list before anything is stored.
    profile_engine::reconcile_profile_vehicles(&mut profile);
    profile.completed_at = Some(Utc::now());

    state.profiles.upsert_profile(&user.id, profile.clone()).await?;
    tracing::info!(user_id = %user.id, "questionnaire saved");

    Ok(Json(QuestionnaireResponse {
        message: "Questionnaire saved successfully".to_string(),
        questionnaire: profile,
    }))
}

/// GET /api/questionnaire
pub async fn get_questionnaire(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let profile = state
        .profiles
        .get_profile(&user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Questionnaire not found".to_string()))?;
    Ok(Json(profile))
}

/// DELETE /api/questionnaire
/// Atomic reset back to the uninitialized state; safe to repeat.
pub async fn delete_questionnaire(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let removed = state.profiles.delete_profile(&user.id).await?;
    tracing::info!(user_id = %user.id, removed, "questionnaire reset");
    Ok(Json(
        serde_json::json!({ "message": "Financial data has been reset" }),
    ))
}

// ---- Transactions ----

#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    #[serde(deserialize_with = "models::num::lenient_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub date: String,
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(new): Json<NewTransaction>,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let transaction = Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: user.id,
        amount: new.amount,
        kind: new.kind,
        category: new.category,
        description: new.description,
        date: new.date,
        created_at: Utc::now(),
    };
    state.transactions.create_transaction(transaction.clone()).await?;
    Ok(Json(transaction))
}

#[derive(Debug, Deserialize)]
pub struct ListTransactionsParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

/// GET /api/transactions?limit=N
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListTransactionsParams>,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let transactions = state
        .transactions
        .list_transactions(&user.id, params.limit)
        .await?;
    Ok(Json(transactions))
}

/// DELETE /api/transactions/:transaction_id
pub async fn delete_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let removed = state
        .transactions
        .delete_transaction(&user.id, &transaction_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Transaction not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Transaction deleted" })))
}

// ---- Reports ----

/// GET /api/reports/health-score
/// Quick dashboard score over the transaction ledger.
pub async fn health_score(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let transactions = state.transactions.list_transactions(&user.id, 1000).await?;
    Ok(Json(report_engine::quick_health_score(&transactions)))
}

/// GET /api/reports/health-profile
/// Comprehensive age-benchmarked report over the saved profile.
pub async fn health_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let profile = state
        .profiles
        .get_profile(&user.id)
        .await?
        .unwrap_or_default();
    Ok(Json(health_engine::health_report(
        &profile,
        user.age,
        user.no_of_dependents,
    )))
}

/// GET /api/reports/pl
pub async fn pl_statement(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let transactions = state.transactions.list_transactions(&user.id, 1000).await?;
    Ok(Json(report_engine::profit_and_loss(&transactions)))
}

/// GET /api/reports/balance-sheet
/// An absent profile yields an all-zero sheet rather than an error.
pub async fn balance_sheet(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let profile = state
        .profiles
        .get_profile(&user.id)
        .await?
        .unwrap_or_default();
    Ok(Json(report_engine::balance_sheet(&profile)))
}
