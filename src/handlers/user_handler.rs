use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{CreateUserRequestDto, UpdateUserRequestDto},
        response::{DeleteResponse, UserDto},
    },
};

#[post("/api/users")]
async fn create_user(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateUserRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let request = request.into_inner();
    request.validate()?;

    let user = state.user_service.create_user(request).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

#[get("/api/users")]
async fn get_all_users(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let users = state.user_service.get_all_users().await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[put("/api/users/{username}")]
async fn update_user(
    state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
    request: web::Json<UpdateUserRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let request = request.into_inner();
    request.validate()?;

    let user = state.user_service.update_user(&username, request).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[delete("/api/users/{username}")]
async fn delete_user(
    state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state
        .user_service
        .delete_user(&username, &auth.0.sub)
        .await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("User '{}' deleted", username),
    }))
}
