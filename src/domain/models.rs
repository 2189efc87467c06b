use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub user_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Partial update: only fields present in the payload are applied.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: u32,
    pub category: String,
    pub amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub user_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_balance: f64,
}

/// One point in a report series, shaped for charting clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportPoint {
    pub name: String,
    pub value: f64,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        DomainError::Validation("Invalid date format. Dates should be YYYY-MM-DD.".to_string())
    })
}

/// Rounds to two decimal places; all aggregate amounts go through here.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
