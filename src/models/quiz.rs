// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::Question;
use crate::utils::html::clean_html;

/// A stored quiz. Immutable once created, except through the explicit
/// edit-and-replace operation keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Order is significant: it defines presentation and the grading index.
    pub questions: Vec<Question>,

    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Quiz {
    /// Builds a new quiz with a generated id and sanitized display text.
    pub fn new(title: &str, description: &str, questions: Vec<Question>, created_by: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: clean_html(title.trim()),
            description: clean_html(description.trim()),
            questions,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        }
    }
}
