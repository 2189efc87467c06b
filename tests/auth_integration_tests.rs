use actix_web::{App, test, web};
use pfm_api::application::auth_service::AuthService;
use pfm_api::application::budget_service::BudgetService;
use pfm_api::application::report_service::ReportService;
use pfm_api::application::transaction_service::TransactionService;
use pfm_api::data::budget_repository::InMemoryBudgetRepository;
use pfm_api::data::transaction_repository::InMemoryTransactionRepository;
use pfm_api::data::user_repository::InMemoryUserRepository;
use pfm_api::presentation::auth::{login, register};
use pfm_api::presentation::handlers::AppState;
use std::sync::Arc;

macro_rules! setup_auth_test {
    () => {{
        let transaction_repository = Arc::new(InMemoryTransactionRepository::new());
        let jwt_secret = "test-secret-key-for-testing-only".to_string();
        let state = web::Data::new(AppState {
            transactions: TransactionService::new(transaction_repository.clone()),
            budgets: BudgetService::new(Arc::new(InMemoryBudgetRepository::new())),
            reports: ReportService::new(transaction_repository),
            auth_service: Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                jwt_secret,
            )),
        });

        test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/auth/register", web::post().to(register))
                .route("/auth/login", web::post().to(login)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_register_returns_created_with_user_id() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["user_id"].as_u64().is_some());
    assert_eq!(body["message"], "User registered successfully");
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_auth_test!();
    let payload = serde_json::json!({
        "email": "bob@example.com",
        "password": "secret123"
    });

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(payload.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_register_rejects_empty_fields() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({ "email": "", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_login_returns_token_and_user_email() {
    let app = setup_auth_test!();
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "carol@example.com",
            "password": "secret123"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "carol@example.com",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["user"]["email"], "carol@example.com");
}

#[actix_web::test]
async fn test_login_rejects_wrong_password() {
    let app = setup_auth_test!();
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "dave@example.com",
            "password": "secret123"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "dave@example.com",
            "password": "wrong"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_login_rejects_unknown_email() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "nobody@example.com",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_login_rejects_missing_fields() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "email": "", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}
