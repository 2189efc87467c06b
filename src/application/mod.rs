pub mod auth_service;
pub mod budget_service;
pub mod report_service;
pub mod transaction_service;
