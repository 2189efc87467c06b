pub mod auth;
pub mod budgets;
pub mod handlers;
pub mod middleware;
pub mod reports;
pub mod transactions;
