// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        question::{IncomingQuestion, normalize_questions},
        quiz::Quiz,
    },
    parser,
    storage::SharedStore,
    utils::{html::clean_html, llm::ChatClient},
};

/// DTO for uploading (or replacing) a quiz from structured JSON.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadQuizRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Quiz must contain between 1 and 100 questions"
    ))]
    pub questions: Vec<IncomingQuestion>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Creates a quiz from structured JSON.
///
/// Runs the full per-question validation; nothing is persisted unless every
/// question passes.
pub async fn upload_quiz(
    State(store): State<SharedStore>,
    Json(payload): Json<UploadQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let questions = normalize_questions(payload.questions)?;
    let quiz = Quiz::new(
        non_empty(payload.title).as_deref().unwrap_or("Uploaded Quiz"),
        non_empty(payload.description)
            .as_deref()
            .unwrap_or("Quiz uploaded from file"),
        questions,
        "admin",
    );

    store.append_quiz(quiz.clone()).await?;
    tracing::info!(
        "Stored quiz {} with {} questions",
        quiz.id,
        quiz.questions.len()
    );

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// DTO for importing a quiz from pasted text.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportTextRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Quiz text is required."))]
    pub text: String,
}

/// Creates a quiz from a pasted block of question text.
///
/// The parser silently drops malformed blocks; an entirely unusable paste
/// surfaces here as a 400.
pub async fn import_quiz_text(
    State(store): State<SharedStore>,
    Json(payload): Json<ImportTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut questions = parser::parse_quiz_text(&payload.text);
    if questions.is_empty() {
        return Err(AppError::BadRequest(
            "No valid questions found in the provided text".to_string(),
        ));
    }
    for question in &mut questions {
        question.text = clean_html(&question.text);
    }

    let quiz = Quiz::new(
        non_empty(payload.title).as_deref().unwrap_or("Imported Quiz"),
        non_empty(payload.description)
            .as_deref()
            .unwrap_or("Quiz imported from pasted text"),
        questions,
        "admin",
    );

    store.append_quiz(quiz.clone()).await?;
    tracing::info!(
        "Imported quiz {} with {} questions from pasted text",
        quiz.id,
        quiz.questions.len()
    );

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Replaces a quiz in full, keeping its id, creation time and creator.
pub async fn replace_quiz(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<UploadQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let existing = store
        .find_quiz(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    let questions = normalize_questions(payload.questions)?;
    let quiz = Quiz {
        id: existing.id,
        title: non_empty(payload.title)
            .map(|title| clean_html(title.trim()))
            .unwrap_or(existing.title),
        description: non_empty(payload.description)
            .map(|description| clean_html(description.trim()))
            .unwrap_or(existing.description),
        questions,
        created_at: existing.created_at,
        created_by: existing.created_by,
    };

    if !store.replace_quiz(quiz.clone()).await? {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(quiz))
}

/// Lists all submissions, newest first.
pub async fn list_submissions(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let mut results = store.list_results().await?;
    results.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSubmissionRequest {
    pub approved_by: Option<String>,
}

/// Marks a submission as approved. Approval is the only mutation a recorded
/// result ever receives.
pub async fn approve_submission(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Option<Json<ApproveSubmissionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let approved_by = payload
        .and_then(|Json(req)| req.approved_by)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "admin".to_string());

    let result = store
        .approve_result(&id, &approved_by, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    Ok(Json(result))
}

/// DTO for AI quiz generation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub prompt: String,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

fn default_question_count() -> u32 {
    5
}

fn default_question_type() -> String {
    "multiple-choice".to_string()
}

/// Reply shape the model is instructed to produce.
#[derive(Debug, Deserialize)]
struct GeneratedQuizReply {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    questions: Vec<IncomingQuestion>,
}

fn generation_system_prompt(question_count: u32, question_type: &str) -> String {
    format!(
        "You are a quiz generator. Create exactly {count} {kind} questions based on the user's prompt.\n\n\
         IMPORTANT: Respond ONLY with a valid JSON object in this exact format:\n\
         {{\n\
           \"title\": \"Quiz Title\",\n\
           \"description\": \"Brief description\",\n\
           \"questions\": [\n\
             {{\n\
               \"question\": \"Question text?\",\n\
               \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n\
               \"correctAnswer\": \"Option A\",\n\
               \"type\": \"multiple-choice\"\n\
             }}\n\
           ]\n\
         }}\n\n\
         For true/false questions, use only [\"True\", \"False\"] as options.\n\
         For multiple choice, use 4 options.\n\
         Make sure the correctAnswer exactly matches one of the options.\n\
         Do not include any text before or after the JSON.",
        count = question_count,
        kind = question_type,
    )
}

/// Generates a quiz with an OpenAI-compatible model and stores it.
///
/// The model's reply goes through the same per-question validation as a
/// structured upload, so a malformed generation never persists a quiz.
pub async fn generate_quiz(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    }

    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or_else(|| AppError::InternalServerError("OpenAI API key not configured".to_string()))?;

    let client = ChatClient::new(api_key, &config.openai_base_url, &config.openai_model);
    let system_prompt =
        generation_system_prompt(payload.question_count, &payload.question_type);
    let user_prompt = format!(
        "{}. Generate {} {} questions.",
        payload.prompt.trim(),
        payload.question_count,
        payload.question_type
    );

    let reply = client.complete(&system_prompt, &user_prompt).await?;

    let mut generated: GeneratedQuizReply = serde_json::from_str(reply.trim()).map_err(|e| {
        tracing::error!("Failed to parse model reply as quiz JSON: {}", e);
        AppError::InternalServerError("Invalid JSON response from the model".to_string())
    })?;

    if generated.questions.is_empty() {
        return Err(AppError::InternalServerError(
            "Invalid quiz structure: missing questions array".to_string(),
        ));
    }

    // The model sometimes omits per-question types; fall back to the
    // requested one before validation.
    for question in &mut generated.questions {
        if question.question_type.is_none() {
            question.question_type = Some(payload.question_type.clone());
        }
    }

    let questions = normalize_questions(generated.questions)?;
    let quiz = Quiz::new(
        non_empty(generated.title).as_deref().unwrap_or("Generated Quiz"),
        non_empty(generated.description)
            .as_deref()
            .unwrap_or("AI-generated quiz"),
        questions,
        "admin",
    );

    store.append_quiz(quiz.clone()).await?;
    tracing::info!(
        "Generated quiz {} with {} questions",
        quiz.id,
        quiz.questions.len()
    );

    Ok((StatusCode::CREATED, Json(quiz)))
}
