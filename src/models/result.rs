// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::AnswerKey;

/// Per-question grading outcome.
///
/// `correct_answer` is stored as given on the quiz, not case-folded, and
/// `options` is a snapshot taken at grading time, not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question_id: String,
    #[serde(rename = "question")]
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: AnswerKey,
    pub is_correct: bool,
    pub options: Vec<String>,
}

/// A graded submission. Created once; approval is the only later mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,

    /// Quiz title/description at submission time. Denormalized on purpose:
    /// the quiz may be replaced after this result is recorded.
    pub quiz_title: String,
    pub quiz_description: String,

    pub user_name: String,

    /// Respondent answers, aligned by index with the quiz's question order.
    pub answers: Vec<String>,
    pub detailed_answers: Vec<AnswerDetail>,

    pub score: u32,
    pub total_questions: u32,

    /// `None` when the quiz had no questions; display as "N/A".
    pub percentage: Option<u32>,

    pub submitted_at: DateTime<Utc>,

    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
}

/// Request body for taking a quiz.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub quiz_id: String,
    pub user_name: String,

    /// One entry per question, in question order. Missing trailing entries
    /// are graded as empty answers.
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Request body for exporting a result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub result: QuizResult,
    pub user_name: String,
}
