// src/storage/mod.rs

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{quiz::Quiz, result::QuizResult};

pub type SharedStore = Arc<dyn QuizStore>;

/// Persistence seam for quizzes and submissions.
///
/// Handlers only ever see this trait; the backend behind it is selected by
/// configuration. None of the backends provide atomic read-modify-write
/// against external writers — contention on the backing medium is the
/// storage layer's problem, not the callers'.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn append_quiz(&self, quiz: Quiz) -> Result<(), AppError>;

    /// All quizzes, oldest first.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError>;

    async fn find_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError>;

    /// The most recently appended quiz.
    async fn latest_quiz(&self) -> Result<Option<Quiz>, AppError>;

    /// Replaces the stored quiz carrying `quiz.id` in full.
    /// Returns `false` when no such quiz exists.
    async fn replace_quiz(&self, quiz: Quiz) -> Result<bool, AppError>;

    async fn append_result(&self, result: QuizResult) -> Result<(), AppError>;

    /// All submissions, in insertion order.
    async fn list_results(&self) -> Result<Vec<QuizResult>, AppError>;

    /// Marks a submission approved and returns the updated record, or
    /// `None` when the id is unknown. Approving twice is a conflict.
    async fn approve_result(
        &self,
        id: &str,
        approved_by: &str,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<QuizResult>, AppError>;
}
