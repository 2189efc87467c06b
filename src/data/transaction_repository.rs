use crate::domain::models::{Transaction, TransactionKind};
use crate::domain::repository::TransactionRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryTransactionRepository {
    storage: Arc<RwLock<HashMap<u32, Transaction>>>,
    next_id: Arc<AtomicU32>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }
}

impl Default for InMemoryTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    #[instrument(skip(self, transaction), fields(user_id = transaction.user_id))]
    async fn insert(&self, mut transaction: Transaction) -> Result<Transaction> {
        let mut storage = self.storage.write().await;
        transaction.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        storage.insert(transaction.id, transaction.clone());
        debug!(
            transaction_id = transaction.id,
            user_id = transaction.user_id,
            "Transaction saved to memory storage"
        );
        Ok(transaction)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: u32) -> Result<Vec<Transaction>> {
        let storage = self.storage.read().await;
        let mut transactions: Vec<Transaction> = storage
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // Creation order descending; id breaks timestamp ties.
        transactions.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(transactions)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, user_id: u32, id: u32) -> Result<Option<Transaction>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(&id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    #[instrument(skip(self, transaction), fields(transaction_id = transaction.id))]
    async fn update(&self, transaction: Transaction) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(transaction.id, transaction);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: u32, id: u32) -> Result<bool> {
        let mut storage = self.storage.write().await;
        match storage.get(&id) {
            Some(t) if t.user_id == user_id => {
                storage.remove(&id);
                debug!(transaction_id = id, user_id = user_id, "Transaction deleted");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn sum_by_kind(&self, user_id: u32, kind: TransactionKind) -> Result<f64> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|t| t.user_id == user_id && t.kind == kind)
            .map(|t| t.amount)
            .sum())
    }

    #[instrument(skip(self))]
    async fn expenses_between(
        &self,
        user_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|t| {
                t.user_id == user_id
                    && t.kind == TransactionKind::Expense
                    && t.date >= start
                    && t.date <= end
            })
            .cloned()
            .collect())
    }
}
