// src/models/question.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::html::clean_html;

/// Question kinds supported by the quiz engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "true-false")]
    TrueFalse,
    #[serde(rename = "enumeration")]
    Enumeration,
}

/// The accepted answer(s) for a question.
///
/// Multiple-choice and true/false questions carry a single accepted answer;
/// enumeration questions carry an unordered set. Serialized untagged so the
/// wire shape stays `string | string[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerKey {
    /// All accepted values, regardless of variant.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            AnswerKey::Single(value) => std::slice::from_ref(value),
            AnswerKey::Multiple(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Display form: the single value, or the members joined with ", ".
    pub fn display(&self) -> String {
        match self {
            AnswerKey::Single(value) => value.clone(),
            AnswerKey::Multiple(values) => values.join(", "),
        }
    }
}

/// A stored quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// The prompt shown to the respondent.
    #[serde(rename = "question")]
    pub text: String,

    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Selectable options. Always `["True", "False"]` for true/false;
    /// may be empty for free-text enumeration.
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(rename = "correctAnswer")]
    pub answer_key: AnswerKey,
}

/// Raw question shape accepted from uploads and the generation endpoint.
/// Fields are optional so validation can name the one that is missing.
#[derive(Debug, Serialize, Deserialize)]
pub struct IncomingQuestion {
    pub question: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: Option<AnswerKey>,
}

/// Validates raw questions and converts them into stored `Question`s.
///
/// * Every violation produces a message naming the offending question.
/// * Multiple-choice: at least 2 options, single answer drawn from them.
/// * True/false: options forced to `["True", "False"]`, answer case-normalized.
/// * Enumeration: non-empty answer set; when options are supplied every
///   answer must be one of them (options may be empty for free-text entry).
///
/// Nothing is stored unless the whole batch passes.
pub fn normalize_questions(incoming: Vec<IncomingQuestion>) -> Result<Vec<Question>, AppError> {
    let mut questions = Vec::with_capacity(incoming.len());

    for (index, raw) in incoming.into_iter().enumerate() {
        let number = index + 1;

        let text = raw.question.as_deref().map(str::trim).unwrap_or_default();
        let kind_name = raw
            .question_type
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() || kind_name.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Question {}: Missing question text or type",
                number
            )));
        }

        let kind = match kind_name {
            "multiple-choice" => QuestionKind::MultipleChoice,
            "true-false" => QuestionKind::TrueFalse,
            "enumeration" => QuestionKind::Enumeration,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Question {}: Invalid question type. Must be 'multiple-choice', 'true-false', or 'enumeration'",
                    number
                )));
            }
        };

        let (options, answer_key) = match kind {
            QuestionKind::MultipleChoice => {
                if raw.options.len() < 2 {
                    return Err(AppError::BadRequest(format!(
                        "Question {}: Multiple choice questions must have at least 2 options",
                        number
                    )));
                }
                match raw.correct_answer {
                    Some(AnswerKey::Single(answer)) if raw.options.contains(&answer) => {
                        (raw.options, AnswerKey::Single(answer))
                    }
                    _ => {
                        return Err(AppError::BadRequest(format!(
                            "Question {}: Correct answer must be one of the provided options",
                            number
                        )));
                    }
                }
            }
            QuestionKind::TrueFalse => {
                let answer = match &raw.correct_answer {
                    Some(AnswerKey::Single(answer)) if answer.eq_ignore_ascii_case("true") => {
                        "True"
                    }
                    Some(AnswerKey::Single(answer)) if answer.eq_ignore_ascii_case("false") => {
                        "False"
                    }
                    _ => {
                        return Err(AppError::BadRequest(format!(
                            "Question {}: True/False questions must have 'True' or 'False' as correct answer",
                            number
                        )));
                    }
                };
                (
                    vec!["True".to_string(), "False".to_string()],
                    AnswerKey::Single(answer.to_string()),
                )
            }
            QuestionKind::Enumeration => {
                let answers: Vec<String> = match raw.correct_answer {
                    Some(AnswerKey::Multiple(values)) => values,
                    Some(AnswerKey::Single(value)) => vec![value],
                    None => Vec::new(),
                };
                if answers.is_empty() {
                    return Err(AppError::BadRequest(format!(
                        "Question {}: At least one correct answer is required",
                        number
                    )));
                }
                if !raw.options.is_empty() {
                    for answer in &answers {
                        if !raw.options.contains(answer) {
                            return Err(AppError::BadRequest(format!(
                                "Question {}: Correct answer '{}' not found in options",
                                number, answer
                            )));
                        }
                    }
                }
                (raw.options, AnswerKey::Multiple(answers))
            }
        };

        questions.push(Question {
            id: Uuid::new_v4().to_string(),
            text: clean_html(text),
            kind,
            options,
            answer_key,
        });
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(json: serde_json::Value) -> IncomingQuestion {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn accepts_a_valid_multiple_choice_question() {
        let questions = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Pick one",
            "type": "multiple-choice",
            "options": ["A", "B"],
            "correctAnswer": "B"
        }))])
        .unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[0].answer_key, AnswerKey::Single("B".to_string()));
        assert!(!questions[0].id.is_empty());
    }

    #[test]
    fn rejects_missing_text_with_question_number() {
        let err = normalize_questions(vec![
            incoming(serde_json::json!({
                "question": "Fine",
                "type": "true-false",
                "correctAnswer": "True"
            })),
            incoming(serde_json::json!({
                "type": "multiple-choice",
                "options": ["A", "B"],
                "correctAnswer": "A"
            })),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("Question 2"));
        assert!(err.to_string().contains("Missing question text or type"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Pick",
            "type": "matching",
            "options": ["A", "B"],
            "correctAnswer": "A"
        }))])
        .unwrap_err();

        assert!(err.to_string().contains("Invalid question type"));
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Pick",
            "type": "multiple-choice",
            "options": ["A", "B"],
            "correctAnswer": "C"
        }))])
        .unwrap_err();

        assert!(
            err.to_string()
                .contains("Correct answer must be one of the provided options")
        );
    }

    #[test]
    fn normalizes_true_false_case_and_options() {
        let questions = normalize_questions(vec![incoming(serde_json::json!({
            "question": "The sky is blue.",
            "type": "true-false",
            "correctAnswer": "true"
        }))])
        .unwrap();

        assert_eq!(questions[0].options, vec!["True", "False"]);
        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Single("True".to_string())
        );
    }

    #[test]
    fn enumeration_without_options_accepts_free_text_answers() {
        let questions = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Name two primary colors",
            "type": "enumeration",
            "correctAnswer": ["red", "blue"]
        }))])
        .unwrap();

        assert!(questions[0].options.is_empty());
        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Multiple(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn enumeration_answers_must_come_from_supplied_options() {
        let err = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Name two primary colors",
            "type": "enumeration",
            "options": ["red", "blue", "green"],
            "correctAnswer": ["red", "purple"]
        }))])
        .unwrap_err();

        assert!(err.to_string().contains("'purple' not found in options"));
    }

    #[test]
    fn enumeration_single_answer_becomes_one_member_set() {
        let questions = normalize_questions(vec![incoming(serde_json::json!({
            "question": "Name the red planet",
            "type": "enumeration",
            "correctAnswer": "Mars"
        }))])
        .unwrap();

        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Multiple(vec!["Mars".to_string()])
        );
    }
}
