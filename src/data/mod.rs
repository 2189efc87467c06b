pub mod budget_repository;
pub mod transaction_repository;
pub mod user_repository;
