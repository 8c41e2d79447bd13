use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::JwtService,
    errors::AppError,
    models::dto::{request::LoginRequestDto, response::LoginResponse},
};

#[post("/auth/login")]
pub async fn login(
    state: web::Data<Arc<AppState>>,
    jwt_service: web::Data<JwtService>,
    request: web::Json<LoginRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state
        .user_service
        .verify_credentials(&request.username, &request.password)
        .await?;

    let token = jwt_service.create_token(&user)?;

    log::info!("user {} logged in", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        username: user.username,
        role: user.role,
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
