use crate::domain::error::DomainError;
use crate::domain::models::{
    NewTransaction, Summary, Transaction, TransactionKind, TransactionPatch, parse_date, round2,
};
use crate::domain::repository::TransactionRepository;
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

pub struct TransactionService<R: TransactionRepository> {
    repository: Arc<R>,
}

impl<R: TransactionRepository> TransactionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: u32) -> Result<Vec<Transaction>> {
        self.repository.list_by_user(user_id).await
    }

    #[instrument(skip(self, req), fields(user_id = user_id))]
    pub async fn add(&self, user_id: u32, req: NewTransaction) -> Result<Transaction> {
        if req.description.is_empty() {
            return Err(DomainError::Validation("Description is required".to_string()).into());
        }
        validate_amount(req.amount)?;
        let date = match req.date.as_deref() {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => Utc::now().date_naive(),
        };

        let transaction = Transaction {
            id: 0, // assigned by the store
            description: req.description,
            amount: req.amount,
            kind: req.kind,
            category: req.category,
            date,
            timestamp: Utc::now(),
            user_id,
        };
        let transaction = self.repository.insert(transaction).await?;

        info!(
            transaction_id = transaction.id,
            user_id = user_id,
            "Transaction added"
        );
        Ok(transaction)
    }

    /// Applies a partial patch; fields absent from the payload keep their
    /// prior value. Nothing is written unless the whole patch validates.
    #[instrument(skip(self, patch), fields(user_id = user_id, transaction_id = id))]
    pub async fn update(
        &self,
        user_id: u32,
        id: u32,
        patch: TransactionPatch,
    ) -> Result<Transaction> {
        let mut transaction = self
            .repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Transaction not found".to_string()))?;

        if let Some(description) = patch.description {
            if description.is_empty() {
                return Err(DomainError::Validation("Description is required".to_string()).into());
            }
            transaction.description = description;
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            transaction.amount = amount;
        }
        if let Some(kind) = patch.kind {
            transaction.kind = kind;
        }
        if let Some(category) = patch.category {
            transaction.category = category;
        }
        if let Some(raw) = patch.date.as_deref() {
            if !raw.is_empty() {
                transaction.date = parse_date(raw)?;
            }
        }

        self.repository.update(transaction.clone()).await?;
        info!(transaction_id = id, user_id = user_id, "Transaction updated");
        Ok(transaction)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: u32, id: u32) -> Result<()> {
        if !self.repository.delete(user_id, id).await? {
            return Err(DomainError::NotFound("Transaction not found".to_string()).into());
        }
        info!(transaction_id = id, user_id = user_id, "Transaction deleted");
        Ok(())
    }

    /// Income and expense totals plus net balance, rounded to cents.
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: u32) -> Result<Summary> {
        let total_income = self
            .repository
            .sum_by_kind(user_id, TransactionKind::Income)
            .await?;
        let total_expenses = self
            .repository
            .sum_by_kind(user_id, TransactionKind::Expense)
            .await?;

        Ok(Summary {
            total_income: round2(total_income),
            total_expenses: round2(total_expenses),
            total_balance: round2(total_income - total_expenses),
        })
    }
}
