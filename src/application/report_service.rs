use crate::domain::models::{ReportPoint, round2};
use crate::domain::repository::TransactionRepository;
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;

/// Trailing window selector for reports. Months are approximated as 30
/// days, matching the behavior clients already depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    ThreeMonths,
    #[default]
    SixMonths,
    OneYear,
}

impl Period {
    /// Unknown tokens fall back to six months.
    pub fn from_token(token: &str) -> Self {
        match token {
            "3months" => Period::ThreeMonths,
            "1year" => Period::OneYear,
            _ => Period::SixMonths,
        }
    }

    fn days(self) -> i64 {
        match self {
            Period::ThreeMonths => 3 * 30,
            Period::SixMonths => 6 * 30,
            Period::OneYear => 365,
        }
    }
}

/// The inclusive date range [today - N, today] both report kinds share.
pub fn report_window(today: NaiveDate, period: Period) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(period.days()), today)
}

pub struct ReportService<R: TransactionRepository> {
    repository: Arc<R>,
}

impl<R: TransactionRepository> ReportService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Monthly expense totals within the window, chronologically ascending,
    /// labelled "Mon YYYY". Months without expenses are omitted.
    #[instrument(skip(self))]
    pub async fn spending_patterns(&self, user_id: u32, period: Period) -> Result<Vec<ReportPoint>> {
        self.spending_patterns_as_of(user_id, period, Utc::now().date_naive())
            .await
    }

    pub async fn spending_patterns_as_of(
        &self,
        user_id: u32,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<ReportPoint>> {
        let (start, end) = report_window(today, period);
        let expenses = self.repository.expenses_between(user_id, start, end).await?;

        let mut monthly: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for transaction in expenses {
            // Day 1 always exists, so with_day cannot miss here.
            if let Some(month_start) = transaction.date.with_day(1) {
                *monthly.entry(month_start).or_insert(0.0) += transaction.amount;
            }
        }

        Ok(monthly
            .into_iter()
            .map(|(month_start, total)| ReportPoint {
                name: month_start.format("%b %Y").to_string(),
                value: round2(total),
            })
            .collect())
    }

    /// Expense totals per category within the window, in no defined order.
    #[instrument(skip(self))]
    pub async fn category_distribution(
        &self,
        user_id: u32,
        period: Period,
    ) -> Result<Vec<ReportPoint>> {
        self.category_distribution_as_of(user_id, period, Utc::now().date_naive())
            .await
    }

    pub async fn category_distribution_as_of(
        &self,
        user_id: u32,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<ReportPoint>> {
        let (start, end) = report_window(today, period);
        let expenses = self.repository.expenses_between(user_id, start, end).await?;

        let mut by_category: HashMap<String, f64> = HashMap::new();
        for transaction in expenses {
            *by_category.entry(transaction.category).or_insert(0.0) += transaction.amount;
        }

        Ok(by_category
            .into_iter()
            .map(|(category, total)| ReportPoint {
                name: category,
                value: round2(total),
            })
            .collect())
    }
}
