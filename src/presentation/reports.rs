use crate::application::report_service::Period;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{error, instrument};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub period: Option<String>,
}

impl ReportQuery {
    fn period(&self) -> Period {
        Period::from_token(self.period.as_deref().unwrap_or_default())
    }
}

#[instrument(skip(state), fields(user_id = user.user_id))]
pub async fn spending_patterns(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let points = state
        .reports
        .spending_patterns(user.user_id, query.period())
        .await
        .map_err(|e| {
            error!(user_id = user.user_id, error = %e, "Failed to build spending patterns");
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(points))
}

#[instrument(skip(state), fields(user_id = user.user_id))]
pub async fn category_distribution(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let points = state
        .reports
        .category_distribution(user.user_id, query.period())
        .await
        .map_err(|e| {
            error!(user_id = user.user_id, error = %e, "Failed to build category distribution");
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(points))
}
