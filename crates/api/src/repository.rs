use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use models::{FinancialProfile, Transaction, UserProfile};

use crate::error::Result;

/// Full account record as persisted. Never leaves the backend; clients get
/// the [`UserProfile`] projection instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub client_id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub mobile_number: String,
    pub age: u32,
    pub city: String,
    pub marital_status: String,
    pub no_of_dependents: u32,
    pub data_privacy_consent: bool,
    pub monthly_income: f64,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Client-safe view with the freshly computed net worth attached.
    pub fn to_user_profile(&self, networth: f64) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            client_id: self.client_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            mobile_number: self.mobile_number.clone(),
            age: self.age,
            city: self.city.clone(),
            marital_status: self.marital_status.clone(),
            no_of_dependents: self.no_of_dependents,
            monthly_income: self.monthly_income,
            created_at: self.created_at,
            networth,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    pub user_id: String,
    pub profile: FinancialProfile,
}

/// On-disk shape of database.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseFile {
    pub users: Vec<UserRecord>,
    pub sessions: Vec<Session>,
    pub profiles: Vec<StoredProfile>,
    pub transactions: Vec<Transaction>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: UserRecord) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<UserRecord>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, session: Session) -> Result<()>;
    async fn find_session(&self, token: &str) -> Result<Option<Session>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<FinancialProfile>>;
    /// Wholesale replace of the user's single profile document.
    async fn upsert_profile(&self, user_id: &str, profile: FinancialProfile) -> Result<()>;
    /// Atomic reset: the document and every sub-entity vanish together.
    /// Returns whether anything was there to delete.
    async fn delete_profile(&self, user_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Most recent first (by posting date), capped at `limit`.
    async fn list_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>>;
    async fn create_transaction(&self, transaction: Transaction) -> Result<()>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool>;
}

/// File-based implementation that keeps everything in one database.json.
/// Each operation reads, mutates, and rewrites the whole document under a
/// single lock, which is plenty for a personal-finance workload.
pub struct FileDatabase {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDatabase {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<DatabaseFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            // Missing file: start from an empty database.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DatabaseFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, database: &DatabaseFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(database)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FileDatabase {
    async fn create_user(&self, user: UserRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        database.users.push(user);
        self.save(&database).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        Ok(database
            .users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<UserRecord>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        Ok(database
            .users
            .into_iter()
            .find(|u| u.client_id == client_id))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        Ok(database.users.into_iter().find(|u| u.id == id))
    }
}

#[async_trait]
impl SessionStore for FileDatabase {
    async fn create_session(&self, session: Session) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        // Drop already-expired sessions while we are here.
        let now = Utc::now();
        database.sessions.retain(|s| s.expires_at > now);
        database.sessions.push(session);
        self.save(&database).await
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        Ok(database.sessions.into_iter().find(|s| s.token == token))
    }
}

#[async_trait]
impl ProfileStore for FileDatabase {
    async fn get_profile(&self, user_id: &str) -> Result<Option<FinancialProfile>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        Ok(database
            .profiles
            .into_iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.profile))
    }

    async fn upsert_profile(&self, user_id: &str, profile: FinancialProfile) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        match database.profiles.iter_mut().find(|p| p.user_id == user_id) {
            Some(stored) => stored.profile = profile,
            None => database.profiles.push(StoredProfile {
                user_id: user_id.to_string(),
                profile,
            }),
        }
        self.save(&database).await
    }

    async fn delete_profile(&self, user_id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        let before = database.profiles.len();
        database.profiles.retain(|p| p.user_id != user_id);
        let removed = database.profiles.len() != before;
        if removed {
            self.save(&database).await?;
        }
        Ok(removed)
    }
}

#[async_trait]
impl TransactionStore for FileDatabase {
    async fn list_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let _guard = self.lock.lock().await;
        let database = self.load().await?;
        let mut transactions: Vec<Transaction> = database
            .transactions
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        // ISO dates sort correctly as strings; newest first.
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(limit);
        Ok(transactions)
    }

    async fn create_transaction(&self, transaction: Transaction) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        database.transactions.push(transaction);
        self.save(&database).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut database = self.load().await?;
        let before = database.transactions.len();
        database
            .transactions
            .retain(|t| !(t.id == transaction_id && t.user_id == user_id));
        let removed = database.transactions.len() != before;
        if removed {
            self.save(&database).await?;
        }
        Ok(removed)
    }
}
