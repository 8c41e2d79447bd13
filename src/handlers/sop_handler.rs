use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::{
            request::UploadSopRequestDto,
            response::{DeleteResponse, SopDto, SopSummaryDto},
        },
    },
};

/// Upload (or replace) an SOP: the extracted text goes through the package
/// generator and the record is only written when a package comes back.
#[post("/api/sops")]
async fn upload_sop(
    state: web::Data<Arc<AppState>>,
    request: web::Json<UploadSopRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let request = request.into_inner();
    request.validate()?;

    let sop = state
        .sop_service
        .upload_sop(&request.title, &request.text)
        .await?;
    Ok(HttpResponse::Created().json(SopDto::from_sop(&request.title, sop)))
}

#[get("/api/sops")]
async fn list_sops(
    state: web::Data<Arc<AppState>>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sops = state.sop_service.list_sops().await?;
    let dtos: Vec<SopSummaryDto> = sops
        .into_iter()
        .map(|(title, sop)| SopSummaryDto {
            title,
            summary: sop.summary,
        })
        .collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[get("/api/sops/{title}")]
async fn get_sop(
    state: web::Data<Arc<AppState>>,
    title: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sop = state.sop_service.get_sop(&title).await?;

    // Opening an SOP as a trainee lazily creates their result profile
    if auth.0.role == UserRole::User {
        state
            .result_repository
            .get_or_create(&auth.0.sub, &title)
            .await?;
    }

    Ok(HttpResponse::Ok().json(SopDto::from_sop(&title, sop)))
}

#[delete("/api/sops/{title}")]
async fn delete_sop(
    state: web::Data<Arc<AppState>>,
    title: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.sop_service.delete_sop(&title).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("SOP '{}' deleted", title),
    }))
}
