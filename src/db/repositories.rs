//! Postgres-backed account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::store::{AccountStore, ConflictKind, StoreError, StoreResult};
use super::DbPool;
use crate::models::{Account, NewAccount, Role};

const ACCOUNT_COLUMNS: &str = "id, email, username, password_hash, roles, created_at";

#[derive(FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if roles.is_empty() {
            return Err(StoreError::Corrupt(format!("account {} has no roles", row.id)));
        }
        Ok(Account {
            id: row.id,
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            roles,
            created_at: row.created_at,
        })
    }
}

impl From<sqlx::Error> for StoreError {
    /// Unique violations become typed conflicts, keyed by constraint name.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                match db_err.constraint() {
                    Some(c) if c.contains("email") => {
                        return StoreError::Conflict(ConflictKind::Email)
                    }
                    Some(c) if c.contains("username") => {
                        return StoreError::Conflict(ConflictKind::Username)
                    }
                    _ => {}
                }
            }
        }
        StoreError::Db(err)
    }
}

fn role_tags(roles: &BTreeSet<Role>) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

#[derive(Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE {} = $1",
            ACCOUNT_COLUMNS, column
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Account::try_from).transpose()
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: NewAccount) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO accounts (email, username, password_hash, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(role_tags(&account.roles))
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        self.find_one("username", username).await
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn update(&self, account: &Account) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts
            SET username = $2, password_hash = $3, roles = $4
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(role_tags(&account.roles))
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound)?.try_into()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let r = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if r.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
