use crate::domain::models::{NewTransaction, TransactionPatch};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{error, info, instrument};

#[instrument(skip(state), fields(user_id = user.user_id))]
pub async fn list_transactions(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let transactions = state.transactions.list(user.user_id).await.map_err(|e| {
        error!(user_id = user.user_id, error = %e, "Failed to list transactions");
        ApiError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[instrument(skip(state, req), fields(user_id = user.user_id))]
pub async fn add_transaction(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<NewTransaction>,
) -> Result<HttpResponse, ApiError> {
    let transaction = state
        .transactions
        .add(user.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(user_id = user.user_id, error = %e, "Failed to add transaction");
            ApiError::from(e)
        })?;
    info!(
        transaction_id = transaction.id,
        user_id = user.user_id,
        "Transaction created"
    );
    Ok(HttpResponse::Created().json(transaction))
}

#[instrument(skip(state, req), fields(user_id = user.user_id, transaction_id = %*path))]
pub async fn update_transaction(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
    req: web::Json<TransactionPatch>,
) -> Result<HttpResponse, ApiError> {
    let transaction_id = path.into_inner();
    let transaction = state
        .transactions
        .update(user.user_id, transaction_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(
                transaction_id = transaction_id,
                user_id = user.user_id,
                error = %e,
                "Failed to update transaction"
            );
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[instrument(skip(state), fields(user_id = user.user_id, transaction_id = %*path))]
pub async fn delete_transaction(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let transaction_id = path.into_inner();
    state
        .transactions
        .delete(user.user_id, transaction_id)
        .await
        .map_err(|e| {
            error!(
                transaction_id = transaction_id,
                user_id = user.user_id,
                error = %e,
                "Failed to delete transaction"
            );
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Transaction deleted successfully" })))
}

#[instrument(skip(state), fields(user_id = user.user_id))]
pub async fn transaction_summary(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let summary = state.transactions.summary(user.user_id).await.map_err(|e| {
        error!(user_id = user.user_id, error = %e, "Failed to compute summary");
        ApiError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(summary))
}
