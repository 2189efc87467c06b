use crate::domain::models::{Budget, Transaction, TransactionKind};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence gateway for users. Ids are assigned by the store on insert.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, email: String, password_hash: String) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Persistence gateway for transactions. Every read and write is scoped by
/// the owning user id; lookups for rows owned by someone else behave as if
/// the row does not exist.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists the record, assigning its id. Returns the stored row.
    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;
    /// All rows for the user, most recently created first.
    async fn list_by_user(&self, user_id: u32) -> Result<Vec<Transaction>>;
    async fn find_by_id(&self, user_id: u32, id: u32) -> Result<Option<Transaction>>;
    async fn update(&self, transaction: Transaction) -> Result<()>;
    /// Returns false when no owned row matched.
    async fn delete(&self, user_id: u32, id: u32) -> Result<bool>;
    async fn sum_by_kind(&self, user_id: u32, kind: TransactionKind) -> Result<f64>;
    /// Expense rows with date in the inclusive range [start, end].
    async fn expenses_between(
        &self,
        user_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>>;
}

/// Persistence gateway for budgets, owner-scoped like transactions.
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn insert(&self, budget: Budget) -> Result<Budget>;
    /// All rows for the user, ordered by start_date descending.
    async fn list_by_user(&self, user_id: u32) -> Result<Vec<Budget>>;
    async fn find_by_id(&self, user_id: u32, id: u32) -> Result<Option<Budget>>;
    async fn update(&self, budget: Budget) -> Result<()>;
    async fn delete(&self, user_id: u32, id: u32) -> Result<bool>;
}
