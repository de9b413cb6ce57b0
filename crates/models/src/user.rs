use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-safe view of an account. The stored record (with the password
/// hash) lives in the backend; this is what goes over the wire.
///
/// `networth` is recomputed from the current profile on every read; it is
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub client_id: String,
    pub email: String,
    pub name: String,
    pub mobile_number: String,
    pub age: u32,
    pub city: String,
    pub marital_status: String,
    pub no_of_dependents: u32,
    pub monthly_income: f64,
    pub created_at: DateTime<Utc>,
    pub networth: f64,
}
