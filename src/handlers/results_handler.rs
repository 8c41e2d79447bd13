use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_owner_or_results_access, require_results_access, AuthenticatedUser},
    errors::AppError,
};

/// The complete results document: every user's weak areas and history, as
/// shown on the admin and score-viewer dashboards.
#[get("/api/results")]
async fn get_all_results(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_results_access(&auth.0)?;

    let results = state.result_repository.find_all().await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/api/results/{username}")]
async fn get_user_results(
    state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_owner_or_results_access(&auth.0, &username)?;

    let results = state.result_repository.find_by_username(&username).await?;
    Ok(HttpResponse::Ok().json(results))
}
