use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use pfm_api::application::auth_service::AuthService;
use pfm_api::application::budget_service::BudgetService;
use pfm_api::application::report_service::ReportService;
use pfm_api::application::transaction_service::TransactionService;
use pfm_api::data::budget_repository::InMemoryBudgetRepository;
use pfm_api::data::transaction_repository::InMemoryTransactionRepository;
use pfm_api::data::user_repository::InMemoryUserRepository;
use pfm_api::domain::user::{CreateUser, LoginRequest};
use pfm_api::presentation::handlers::AppState;
use pfm_api::presentation::middleware::JwtAuthMiddleware;
use pfm_api::presentation::reports::{category_distribution, spending_patterns};
use pfm_api::presentation::transactions::add_transaction;
use std::sync::Arc;

const JWT_SECRET: &str = "test-secret-key-for-testing-only";

async fn login_as(state: &web::Data<AppState>, email: &str) -> String {
    state
        .auth_service
        .register(CreateUser {
            email: email.to_string(),
            password: "test123".to_string(),
        })
        .await
        .unwrap();
    let (_, token) = state
        .auth_service
        .login(LoginRequest {
            email: email.to_string(),
            password: "test123".to_string(),
        })
        .await
        .unwrap();
    token
}

macro_rules! setup_test {
    () => {{
        let transaction_repository = Arc::new(InMemoryTransactionRepository::new());
        let state = web::Data::new(AppState {
            transactions: TransactionService::new(transaction_repository.clone()),
            budgets: BudgetService::new(Arc::new(InMemoryBudgetRepository::new())),
            reports: ReportService::new(transaction_repository),
            auth_service: Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                JWT_SECRET.to_string(),
            )),
        });

        let token = login_as(&state, "test@example.com").await;

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(JwtAuthMiddleware::new(JWT_SECRET.to_string()))
                .route("/transactions", web::post().to(add_transaction))
                .route(
                    "/reports/spending-patterns",
                    web::get().to(spending_patterns),
                )
                .route(
                    "/reports/category-distribution",
                    web::get().to(category_distribution),
                ),
        )
        .await;

        (app, token, state)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

macro_rules! add {
    ($app:expr, $token:expr, $kind:expr, $category:expr, $amount:expr, $date:expr) => {{
        let req = test::TestRequest::post()
            .uri("/transactions")
            .insert_header(bearer($token))
            .set_json(serde_json::json!({
                "description": "seed",
                "amount": $amount,
                "type": $kind,
                "category": $category,
                "date": $date
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), 201);
    }};
}

#[actix_web::test]
async fn test_spending_patterns_totals_recent_expenses_only() {
    let (app, token, _state) = setup_test!();

    add!(&app, &token, "expense", "Food", 25.0, days_ago(0));
    add!(&app, &token, "expense", "Transport", 15.0, days_ago(10));
    add!(&app, &token, "income", "Salary", 900.0, days_ago(5));
    // Outside even the 1-year window
    add!(&app, &token, "expense", "Food", 99.0, days_ago(400));

    let req = test::TestRequest::get()
        .uri("/reports/spending-patterns?period=1year")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let points: Vec<serde_json::Value> = test::read_body_json(resp).await;

    let total: f64 = points.iter().map(|p| p["value"].as_f64().unwrap()).sum();
    assert_eq!(total, 40.0);
    assert!(!points.is_empty());
    for point in &points {
        assert!(point["name"].as_str().unwrap().len() >= 8); // "Mon YYYY"
    }
}

#[actix_web::test]
async fn test_spending_patterns_respects_short_window() {
    let (app, token, _state) = setup_test!();

    add!(&app, &token, "expense", "Food", 10.0, days_ago(0));
    // Inside 1 year but outside 3 months
    add!(&app, &token, "expense", "Food", 50.0, days_ago(150));

    let req = test::TestRequest::get()
        .uri("/reports/spending-patterns?period=3months")
        .insert_header(bearer(&token))
        .to_request();
    let points: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;

    let total: f64 = points.iter().map(|p| p["value"].as_f64().unwrap()).sum();
    assert_eq!(total, 10.0);
}

#[actix_web::test]
async fn test_category_distribution_groups_and_sums() {
    let (app, token, _state) = setup_test!();

    add!(&app, &token, "expense", "Food", 20.0, days_ago(0));
    add!(&app, &token, "expense", "Food", 30.0, days_ago(1));
    add!(&app, &token, "expense", "Transport", 15.0, days_ago(2));
    add!(&app, &token, "income", "Salary", 500.0, days_ago(1));

    let req = test::TestRequest::get()
        .uri("/reports/category-distribution")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let mut points: Vec<serde_json::Value> = test::read_body_json(resp).await;
    points.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["name"], "Food");
    assert_eq!(points[0]["value"], 50.0);
    assert_eq!(points[1]["name"], "Transport");
    assert_eq!(points[1]["value"], 15.0);
}

#[actix_web::test]
async fn test_unknown_period_token_falls_back_to_default() {
    let (app, token, _state) = setup_test!();

    add!(&app, &token, "expense", "Food", 10.0, days_ago(0));

    let req = test::TestRequest::get()
        .uri("/reports/spending-patterns?period=2weeks")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let points: Vec<serde_json::Value> = test::read_body_json(resp).await;

    let total: f64 = points.iter().map(|p| p["value"].as_f64().unwrap()).sum();
    assert_eq!(total, 10.0);
}

#[actix_web::test]
async fn test_reports_are_owner_scoped() {
    let (app, token, state) = setup_test!();
    let other_token = login_as(&state, "other@example.com").await;

    add!(&app, &token, "expense", "Food", 10.0, days_ago(0));
    add!(&app, &other_token, "expense", "Food", 77.0, days_ago(0));

    let req = test::TestRequest::get()
        .uri("/reports/category-distribution")
        .insert_header(bearer(&token))
        .to_request();
    let points: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["value"], 10.0);
}

#[actix_web::test]
async fn test_reports_require_authentication() {
    let (app, _token, _state) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/reports/spending-patterns")
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    };
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn test_reports_are_empty_without_expenses() {
    let (app, token, _state) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/reports/spending-patterns")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let points: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert!(points.is_empty());
}
