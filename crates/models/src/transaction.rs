use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::num::lenient_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single ledger entry. `date` is the user-facing posting date in
/// `YYYY-MM-DD` form, which sorts correctly as a plain string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}
