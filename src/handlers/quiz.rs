// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    grading,
    models::result::{DownloadRequest, QuizResult, SubmitQuizRequest},
    storage::SharedStore,
    utils::export,
};

/// Lists every stored quiz, oldest first.
pub async fn list_quizzes(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let quizzes = store.list_quizzes().await?;
    Ok(Json(quizzes))
}

/// Returns the most recently created quiz.
pub async fn latest_quiz(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let quiz = store
        .latest_quiz()
        .await?
        .ok_or_else(|| AppError::NotFound("No quiz available".to_string()))?;

    Ok(Json(quiz))
}

/// Returns a single quiz by id.
pub async fn get_quiz(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = store
        .find_quiz(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Grades a submission against the stored quiz and records the result.
///
/// * Missing answers are graded as empty (incorrect), never rejected.
/// * The quiz title/description are copied onto the result, since the quiz
///   may be replaced later.
/// * The result starts unapproved; an admin approves it separately.
pub async fn submit_quiz(
    State(store): State<SharedStore>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.user_name.trim().is_empty() {
        return Err(AppError::BadRequest("User name is required".to_string()));
    }

    let quiz = store
        .find_quiz(&req.quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    let graded = grading::grade(&quiz.questions, &req.answers);

    let result = QuizResult {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id.clone(),
        quiz_title: quiz.title.clone(),
        quiz_description: quiz.description.clone(),
        user_name: req.user_name.trim().to_string(),
        answers: req.answers,
        detailed_answers: graded.details,
        score: graded.score,
        total_questions: quiz.questions.len() as u32,
        percentage: graded.percentage,
        submitted_at: Utc::now(),
        is_approved: false,
        approved_at: None,
        approved_by: None,
    };

    store.append_result(result.clone()).await?;

    tracing::info!(
        "Recorded submission {} for quiz {} ({}/{})",
        result.id,
        result.quiz_id,
        result.score,
        result.total_questions
    );

    Ok((StatusCode::CREATED, Json(result)))
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub format: String,
}

/// Renders a graded result as a downloadable document.
///
/// `format=csv` returns the per-question rows plus the total-score line;
/// `format=txt` returns the plain-text report.
pub async fn download_result(
    Query(params): Query<DownloadParams>,
    Json(req): Json<DownloadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_name = req.user_name.trim();
    if user_name.is_empty() {
        return Err(AppError::BadRequest(
            "Result data and user name are required".to_string(),
        ));
    }

    let (body, content_type, extension) = match params.format.as_str() {
        "csv" => (export::results_csv(&req.result), "text/csv", "csv"),
        "txt" => (
            export::results_text(&req.result, user_name),
            "text/plain",
            "txt",
        ),
        _ => {
            return Err(AppError::BadRequest(
                "Invalid format. Use csv or txt.".to_string(),
            ));
        }
    };

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"quiz-results-{}.{}\"",
                user_name, extension
            ),
        ),
    ];

    Ok((headers, body))
}
