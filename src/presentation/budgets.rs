use crate::domain::models::{BudgetPatch, NewBudget};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{error, info, instrument};

#[instrument(skip(state), fields(user_id = user.user_id))]
pub async fn list_budgets(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let budgets = state.budgets.list(user.user_id).await.map_err(|e| {
        error!(user_id = user.user_id, error = %e, "Failed to list budgets");
        ApiError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(budgets))
}

#[instrument(skip(state, req), fields(user_id = user.user_id))]
pub async fn add_budget(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<NewBudget>,
) -> Result<HttpResponse, ApiError> {
    let budget = state
        .budgets
        .add(user.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(user_id = user.user_id, error = %e, "Failed to add budget");
            ApiError::from(e)
        })?;
    info!(budget_id = budget.id, user_id = user.user_id, "Budget created");
    Ok(HttpResponse::Created().json(budget))
}

#[instrument(skip(state, req), fields(user_id = user.user_id, budget_id = %*path))]
pub async fn update_budget(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
    req: web::Json<BudgetPatch>,
) -> Result<HttpResponse, ApiError> {
    let budget_id = path.into_inner();
    let budget = state
        .budgets
        .update(user.user_id, budget_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(
                budget_id = budget_id,
                user_id = user.user_id,
                error = %e,
                "Failed to update budget"
            );
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(budget))
}

#[instrument(skip(state), fields(user_id = user.user_id, budget_id = %*path))]
pub async fn delete_budget(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let budget_id = path.into_inner();
    state
        .budgets
        .delete(user.user_id, budget_id)
        .await
        .map_err(|e| {
            error!(
                budget_id = budget_id,
                user_id = user.user_id,
                error = %e,
                "Failed to delete budget"
            );
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Budget deleted successfully" })))
}
