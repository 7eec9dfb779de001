// src/storage/file.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::QuizStore;
use crate::error::AppError;
use crate::models::{quiz::Quiz, result::QuizResult};

const QUIZZES_FILE: &str = "quizzes.json";
const RESULTS_FILE: &str = "results.json";

/// JSON-file-backed store: two files under a data directory, loaded at
/// startup and rewritten in full on every mutation.
///
/// Writers within one process are serialized by the locks. The rewrite is
/// not atomic across processes: an external writer sharing the directory
/// can be overwritten.
pub struct FileStore {
    dir: PathBuf,
    quizzes: RwLock<Vec<Quiz>>,
    results: RwLock<Vec<QuizResult>>,
}

impl FileStore {
    /// Opens (and if needed creates) the data directory and loads both files.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;

        let quizzes: Vec<Quiz> = load(&dir.join(QUIZZES_FILE)).await?;
        let results: Vec<QuizResult> = load(&dir.join(RESULTS_FILE)).await?;
        tracing::info!(
            "Loaded {} quizzes and {} results from {}",
            quizzes.len(),
            results.len(),
            dir.display()
        );

        Ok(Self {
            dir,
            quizzes: RwLock::new(quizzes),
            results: RwLock::new(results),
        })
    }

    async fn persist<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        tokio::fs::write(self.dir.join(file), json).await?;
        Ok(())
    }
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            AppError::InternalServerError(format!(
                "Corrupt store file {}: {}",
                path.display(),
                e
            ))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl QuizStore for FileStore {
    async fn append_quiz(&self, quiz: Quiz) -> Result<(), AppError> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.push(quiz);
        self.persist(QUIZZES_FILE, &quizzes).await
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
        let Some(slot) = quizzes.iter_mut().find(|stored| stored.id == quiz.id) else {
            return Ok(false);
        };
        *slot = quiz;
        self.persist(QUIZZES_FILE, &quizzes).await?;
        Ok(true)
    }

    async fn append_result(&self, result: QuizResult) -> Result<(), AppError> {
        let mut results = self.results.write().await;
        results.push(result);
        self.persist(RESULTS_FILE, &results).await
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
        let updated = result.clone();
        self.persist(RESULTS_FILE, &results).await?;
        Ok(Some(updated))
    }
}
