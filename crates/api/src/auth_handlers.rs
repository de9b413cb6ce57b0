use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::UserProfile;
use profile_engine::net_worth;

use crate::auth::{authenticate, generate_client_id, hash_password, new_session, verify_password};
use crate::error::{ApiError, Result};
use crate::handlers::AppState;
use crate::repository::UserRecord;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub mobile_number: String,
    pub age: u32,
    pub city: String,
    pub marital_status: String,
    pub no_of_dependents: u32,
    pub data_privacy_consent: bool,
    #[serde(default)]
    pub monthly_income: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub client_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Net worth is derived from the saved profile at read time; an account
/// without one is simply worth zero.
async fn current_networth(state: &AppState, user_id: &str) -> Result<f64> {
    let networth = state
        .profiles
        .get_profile(user_id)
        .await?
        .map(|profile| net_worth(&profile))
        .unwrap_or(0.0);
    Ok(round2(networth))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    if state.users.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        client_id: generate_client_id(),
        email: request.email,
        password_hash: hash_password(&request.password)?,
        name: request.name,
        mobile_number: request.mobile_number,
        age: request.age,
        city: request.city,
        marital_status: request.marital_status,
        no_of_dependents: request.no_of_dependents,
        data_privacy_consent: request.data_privacy_consent,
        monthly_income: request.monthly_income,
        created_at: Utc::now(),
    };
    state.users.create_user(user.clone()).await?;

    let session = new_session(&user.id);
    state.sessions.create_session(session.clone()).await?;
    tracing::info!(client_id = %user.client_id, "user registered");

    Ok(Json(AuthResponse {
        token: session.token,
        user: user.to_user_profile(0.0),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .users
        .find_by_client_id(request.client_id.trim())
        .await?
        .filter(|u| verify_password(&request.password, &u.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let session = new_session(&user.id);
    state.sessions.create_session(session.clone()).await?;

    let networth = current_networth(&state, &user.id).await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: user.to_user_profile(networth),
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    let user = authenticate(state.sessions.as_ref(), state.users.as_ref(), &headers).await?;
    let networth = current_networth(&state, &user.id).await?;
    Ok(Json(user.to_user_profile(networth)))
}
