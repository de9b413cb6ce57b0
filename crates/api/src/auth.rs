use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::repository::{Session, SessionStore, UserRecord, UserStore};

/// Sessions live for a week, matching the original token lifetime.
pub const SESSION_TTL_HOURS: i64 = 24 * 7;

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| ApiError::Internal(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Client IDs look like `AV1A2B3C4D`.
pub fn generate_client_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("AV{}", raw[..8].to_ascii_uppercase())
}

pub fn new_session(user_id: &str) -> Session {
    Session {
        token: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))
}

/// Resolve the bearer token on a request to its account, rejecting missing,
/// unknown, and expired sessions alike with 401.
pub async fn authenticate(
    sessions: &dyn SessionStore,
    users: &dyn UserStore,
    headers: &HeaderMap,
) -> Result<UserRecord> {
    let token = bearer_token(headers)?;
    let session = sessions
        .find_session(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;
    if session.expires_at < Utc::now() {
        return Err(ApiError::Unauthorized("Token expired".to_string()));
    }
    users
        .find_by_id(&session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_shape() {
        let id = generate_client_id();
        assert_eq!(id.len(), 10);
        assert!(id.starts_with("AV"));
        assert!(id[2..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_ne!(generate_client_id(), id);
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-hash"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");

        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(bearer_token(&headers).is_err());
    }
}
