use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{StartQuizRequestDto, SubmitQuizRequestDto},
        response::{QuizDto, SubmissionResultDto},
    },
};

/// Start a new quiz on an SOP. Any quiz already in progress for this user
/// is discarded without trace.
#[post("/api/sops/{title}/quiz")]
async fn start_quiz(
    state: web::Data<Arc<AppState>>,
    title: web::Path<String>,
    request: web::Json<StartQuizRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state
        .quiz_runner
        .start(&auth.0.sub, &title, request.num_questions)
        .await?
        .ok_or_else(|| {
            AppError::UpstreamError("Quiz generation failed; no quiz available".to_string())
        })?;

    Ok(HttpResponse::Ok().json(QuizDto::from_quiz(&title, &quiz)))
}

/// The caller's in-progress quiz, if any.
#[get("/api/quiz")]
async fn get_active_quiz(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let active = state
        .quiz_runner
        .active_quiz(&auth.0.sub)
        .await
        .ok_or_else(|| AppError::NotFound("No active quiz".to_string()))?;

    Ok(HttpResponse::Ok().json(QuizDto::from_quiz(&active.sop_title, &active.quiz)))
}

/// Submit answers in question order: grades, updates weak areas, appends a
/// history entry and discards the quiz.
#[post("/api/quiz/submit")]
async fn submit_quiz(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SubmitQuizRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .quiz_runner
        .submit(&auth.0.sub, &request.answers)
        .await?;

    Ok(HttpResponse::Ok().json(SubmissionResultDto {
        score: outcome.score,
        total: outcome.total,
        weak_areas: outcome.weak_areas,
        all_mastered: outcome.all_mastered,
    }))
}
