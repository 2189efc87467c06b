use crate::domain::error::DomainError;
use crate::domain::models::{Budget, BudgetPatch, NewBudget, parse_date};
use crate::domain::repository::BudgetRepository;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

fn validate_amount(amount: f64) -> Result<(), DomainError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn validate_window(budget: &Budget) -> Result<(), DomainError> {
    if budget.start_date > budget.end_date {
        return Err(DomainError::Validation(
            "Start date cannot be after end date".to_string(),
        ));
    }
    Ok(())
}

pub struct BudgetService<R: BudgetRepository> {
    repository: Arc<R>,
}

impl<R: BudgetRepository> BudgetService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: u32) -> Result<Vec<Budget>> {
        self.repository.list_by_user(user_id).await
    }

    #[instrument(skip(self, req), fields(user_id = user_id))]
    pub async fn add(&self, user_id: u32, req: NewBudget) -> Result<Budget> {
        if req.category.is_empty() {
            return Err(DomainError::Validation("Category is required".to_string()).into());
        }
        validate_amount(req.amount)?;

        let budget = Budget {
            id: 0, // assigned by the store
            category: req.category,
            amount: req.amount,
            start_date: parse_date(&req.start_date)?,
            end_date: parse_date(&req.end_date)?,
            timestamp: Utc::now(),
            user_id,
        };
        validate_window(&budget)?;

        let budget = self.repository.insert(budget).await?;
        info!(budget_id = budget.id, user_id = user_id, "Budget added");
        Ok(budget)
    }

    /// Merges the patch over the stored record, then re-checks the date
    /// window on the merged result. A violation discards the whole change.
    #[instrument(skip(self, patch), fields(user_id = user_id, budget_id = id))]
    pub async fn update(&self, user_id: u32, id: u32, patch: BudgetPatch) -> Result<Budget> {
        let mut budget = self
            .repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Budget not found".to_string()))?;

        if let Some(category) = patch.category {
            if category.is_empty() {
                return Err(DomainError::Validation("Category is required".to_string()).into());
            }
            budget.category = category;
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            budget.amount = amount;
        }
        if let Some(raw) = patch.start_date.as_deref() {
            if !raw.is_empty() {
                budget.start_date = parse_date(raw)?;
            }
        }
        if let Some(raw) = patch.end_date.as_deref() {
            if !raw.is_empty() {
                budget.end_date = parse_date(raw)?;
            }
        }
        validate_window(&budget)?;

        self.repository.update(budget.clone()).await?;
        info!(budget_id = id, user_id = user_id, "Budget updated");
        Ok(budget)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: u32, id: u32) -> Result<()> {
        if !self.repository.delete(user_id, id).await? {
            return Err(DomainError::NotFound("Budget not found".to_string()).into());
        }
        info!(budget_id = id, user_id = user_id, "Budget deleted");
        Ok(())
    }
}
