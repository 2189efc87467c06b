use crate::domain::models::Budget;
use crate::domain::repository::BudgetRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryBudgetRepository {
    storage: Arc<RwLock<HashMap<u32, Budget>>>,
    next_id: Arc<AtomicU32>,
}

impl InMemoryBudgetRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }
}

impl Default for InMemoryBudgetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BudgetRepository for InMemoryBudgetRepository {
    #[instrument(skip(self, budget), fields(user_id = budget.user_id))]
    async fn insert(&self, mut budget: Budget) -> Result<Budget> {
        let mut storage = self.storage.write().await;
        budget.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        storage.insert(budget.id, budget.clone());
        debug!(
            budget_id = budget.id,
            user_id = budget.user_id,
            "Budget saved to memory storage"
        );
        Ok(budget)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: u32) -> Result<Vec<Budget>> {
        let storage = self.storage.read().await;
        let mut budgets: Vec<Budget> = storage
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| (b.start_date, b.id).cmp(&(a.start_date, a.id)));
        Ok(budgets)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, user_id: u32, id: u32) -> Result<Option<Budget>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).filter(|b| b.user_id == user_id).cloned())
    }

    #[instrument(skip(self, budget), fields(budget_id = budget.id))]
    async fn update(&self, budget: Budget) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(budget.id, budget);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: u32, id: u32) -> Result<bool> {
        let mut storage = self.storage.write().await;
        match storage.get(&id) {
            Some(b) if b.user_id == user_id => {
                storage.remove(&id);
                debug!(budget_id = id, user_id = user_id, "Budget deleted");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
