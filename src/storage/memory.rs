// src/storage/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::QuizStore;
use crate::error::AppError;
use crate::models::{quiz::Quiz, result::QuizResult};

/// In-process store. Contents vanish when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    quizzes: RwLock<Vec<Quiz>>,
    results: RwLock<Vec<QuizResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn append_quiz(&self, quiz: Quiz) -> Result<(), AppError> {
        self.quizzes.write().await.push(quiz);
        Ok(())
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.quizzes.read().await.clone())
    }

    async fn find_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        Ok(self
            .quizzes
            .read()
            .await
            .iter()
            .find(|quiz| quiz.id == id)
            .cloned())
    }

    async fn latest_quiz(&self) -> Result<Option<Quiz>, AppError> {
        Ok(self.quizzes.read().await.last().cloned())
    }

    async fn replace_quiz(&self, quiz: Quiz) -> Result<bool, AppError> {
        let mut quizzes = self.quizzes.write().await;
        match quizzes.iter_mut().find(|stored| stored.id == quiz.id) {
            Some(slot) => {
                *slot = quiz;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_result(&self, result: QuizResult) -> Result<(), AppError> {
        self.results.write().await.push(result);
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<QuizResult>, AppError> {
        Ok(self.results.read().await.clone())
    }

    async fn approve_result(
        &self,
        id: &str,
        approved_by: &str,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<QuizResult>, AppError> {
        let mut results = self.results.write().await;
        let Some(result) = results.iter_mut().find(|result| result.id == id) else {
            return Ok(None);
        };

        if result.is_approved {
            return Err(AppError::Conflict(
                "Submission already approved".to_string(),
            ));
        }

        result.is_approved = true;
        result.approved_at = Some(approved_at);
        result.approved_by = Some(approved_by.to_string());
        Ok(Some(result.clone()))
    }
}
