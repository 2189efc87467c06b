use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use pfm_api::application::auth_service::AuthService;
use pfm_api::application::budget_service::BudgetService;
use pfm_api::application::report_service::ReportService;
use pfm_api::application::transaction_service::TransactionService;
use pfm_api::data::budget_repository::InMemoryBudgetRepository;
use pfm_api::data::transaction_repository::InMemoryTransactionRepository;
use pfm_api::data::user_repository::InMemoryUserRepository;
use pfm_api::infrastructure::logging::init_logging;
use pfm_api::presentation::auth::{login, register};
use pfm_api::presentation::budgets::{add_budget, delete_budget, list_budgets, update_budget};
use pfm_api::presentation::handlers::{AppState, health_check};
use pfm_api::presentation::middleware::{JwtAuthMiddleware, RequestContextMiddleware};
use pfm_api::presentation::reports::{category_distribution, spending_patterns};
use pfm_api::presentation::transactions::{
    add_transaction, delete_transaction, list_transactions, transaction_summary,
    update_transaction,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    info!("Logging initialized");

    let jwt_secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    info!("Creating in-memory repositories");
    let transaction_repository = Arc::new(InMemoryTransactionRepository::new());
    let budget_repository = Arc::new(InMemoryBudgetRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());

    info!("Creating services");
    let state = web::Data::new(AppState {
        transactions: TransactionService::new(transaction_repository.clone()),
        budgets: BudgetService::new(budget_repository),
        reports: ReportService::new(transaction_repository),
        auth_service: Arc::new(AuthService::new(user_repository, jwt_secret.clone())),
    });

    info!(address = %bind_addr, "Starting HTTP server");
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(RequestContextMiddleware)
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(register))
                            .route("/login", web::post().to(login)),
                    )
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
                            .route("/transactions", web::get().to(list_transactions))
                            .route("/transactions", web::post().to(add_transaction))
                            .route("/transactions/summary", web::get().to(transaction_summary))
                            .route("/transactions/{id}", web::put().to(update_transaction))
                            .route("/transactions/{id}", web::delete().to(delete_transaction))
                            .route("/budgets", web::get().to(list_budgets))
                            .route("/budgets", web::post().to(add_budget))
                            .route("/budgets/{id}", web::put().to(update_budget))
                            .route("/budgets/{id}", web::delete().to(delete_budget))
                            .route(
                                "/reports/spending-patterns",
                                web::get().to(spending_patterns),
                            )
                            .route(
                                "/reports/category-distribution",
                                web::get().to(category_distribution),
                            ),
                    ),
            )
    });

    let server = server.bind(bind_addr.as_str())?;
    info!(address = %bind_addr, "Server bound successfully");
    server.run().await
}
