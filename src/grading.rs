// src/grading.rs

use std::collections::HashSet;

use crate::models::question::{AnswerKey, Question, QuestionKind};
use crate::models::result::AnswerDetail;

/// Outcome of grading one submission against a quiz's questions.
#[derive(Debug, Clone)]
pub struct GradedSubmission {
    pub score: u32,

    /// `round(100 * score / total)`; `None` when there were no questions.
    pub percentage: Option<u32>,

    /// One detail per question, in question order.
    pub details: Vec<AnswerDetail>,
}

/// Grades a respondent's answers against the quiz's ordered questions.
///
/// `answers` is aligned by index with `questions`; a missing entry is graded
/// as an empty answer, never as an error. Multiple-choice and true/false
/// answers match case-insensitively against the single accepted answer.
/// Enumeration answers are compared as comma-split, trimmed, lower-cased
/// token sets and must match the accepted set exactly — a missing or extra
/// token makes the answer incorrect.
pub fn grade(questions: &[Question], answers: &[String]) -> GradedSubmission {
    let mut score: u32 = 0;
    let mut details = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let user_answer = answers.get(index).map(String::as_str).unwrap_or("");
        let is_correct = answer_matches(question, user_answer);
        if is_correct {
            score += 1;
        }

        details.push(AnswerDetail {
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            user_answer: user_answer.to_string(),
            correct_answer: question.answer_key.clone(),
            is_correct,
            options: question.options.clone(),
        });
    }

    let total = questions.len() as u32;
    let percentage =
        (total > 0).then(|| (f64::from(score) * 100.0 / f64::from(total)).round() as u32);

    GradedSubmission {
        score,
        percentage,
        details,
    }
}

fn answer_matches(question: &Question, user_answer: &str) -> bool {
    match question.kind {
        QuestionKind::Enumeration => {
            let expected = token_set(question.answer_key.members());
            let given = token_set(std::iter::once(user_answer));
            expected == given
        }
        QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
            match &question.answer_key {
                AnswerKey::Single(expected) => {
                    user_answer.to_lowercase() == expected.to_lowercase()
                }
                // A multi-valued key never validates for these kinds.
                AnswerKey::Multiple(_) => false,
            }
        }
    }
}

/// Splits every value on commas, then trims and lower-cases each token.
fn token_set<'a>(values: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(|token| token.trim().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice(id: &str, text: &str, options: &[&str], answer: &str) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            kind: QuestionKind::MultipleChoice,
            options: options.iter().map(|o| o.to_string()).collect(),
            answer_key: AnswerKey::Single(answer.to_string()),
        }
    }

    fn enumeration(id: &str, text: &str, answers: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            kind: QuestionKind::Enumeration,
            options: Vec::new(),
            answer_key: AnswerKey::Multiple(answers.iter().map(|a| a.to_string()).collect()),
        }
    }

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn exact_match_scores_full_marks() {
        let questions = vec![multiple_choice(
            "q1",
            "What is the capital of France?",
            &["London", "Berlin", "Paris", "Madrid"],
            "Paris",
        )];

        let graded = grade(&questions, &answers(&["Paris"]));

        assert_eq!(graded.score, 1);
        assert_eq!(graded.percentage, Some(100));
        assert!(graded.details[0].is_correct);
    }

    #[test]
    fn wrong_option_scores_zero() {
        let questions = vec![multiple_choice(
            "q1",
            "What is the capital of France?",
            &["London", "Berlin", "Paris", "Madrid"],
            "Paris",
        )];

        let graded = grade(&questions, &answers(&["London"]));

        assert_eq!(graded.score, 0);
        assert_eq!(graded.percentage, Some(0));
        assert!(!graded.details[0].is_correct);
    }

    #[test]
    fn comparison_ignores_case() {
        let questions = vec![Question {
            id: "q1".to_string(),
            text: "The sky is blue.".to_string(),
            kind: QuestionKind::TrueFalse,
            options: vec!["True".to_string(), "False".to_string()],
            answer_key: AnswerKey::Single("True".to_string()),
        }];

        let graded = grade(&questions, &answers(&["true"]));

        assert_eq!(graded.score, 1);
    }

    #[test]
    fn missing_answer_is_graded_as_incorrect_empty_string() {
        let questions = vec![
            multiple_choice("q1", "First?", &["a", "b"], "a"),
            multiple_choice("q2", "Second?", &["c", "d"], "d"),
        ];

        let graded = grade(&questions, &answers(&["a"]));

        assert_eq!(graded.score, 1);
        assert_eq!(graded.details[1].user_answer, "");
        assert!(!graded.details[1].is_correct);
    }

    #[test]
    fn enumeration_matches_regardless_of_order_case_and_spacing() {
        let questions = vec![enumeration("q1", "Two colors?", &["red", "blue"])];

        let graded = grade(&questions, &answers(&["Blue ,  RED"]));

        assert_eq!(graded.score, 1);
    }

    #[test]
    fn enumeration_partial_answer_is_incorrect() {
        let questions = vec![enumeration("q1", "Two colors?", &["red", "blue"])];

        let graded = grade(&questions, &answers(&["red"]));

        assert_eq!(graded.score, 0);
    }

    #[test]
    fn enumeration_extra_token_is_incorrect() {
        let questions = vec![enumeration("q1", "Two colors?", &["red", "blue"])];

        let graded = grade(&questions, &answers(&["red, blue, green"]));

        assert_eq!(graded.score, 0);
    }

    #[test]
    fn enumeration_single_key_accepts_single_answer() {
        let questions = vec![Question {
            id: "q1".to_string(),
            text: "Red planet?".to_string(),
            kind: QuestionKind::Enumeration,
            options: Vec::new(),
            answer_key: AnswerKey::Single("Mars".to_string()),
        }];

        let graded = grade(&questions, &answers(&["mars"]));

        assert_eq!(graded.score, 1);
    }

    #[test]
    fn details_preserve_question_order_and_snapshots() {
        let questions = vec![
            multiple_choice("q1", "First?", &["a", "b"], "a"),
            multiple_choice("q2", "Second?", &["c", "d"], "c"),
        ];

        let graded = grade(&questions, &answers(&["b", "c"]));

        assert_eq!(graded.details.len(), 2);
        assert_eq!(graded.details[0].question_id, "q1");
        assert_eq!(graded.details[1].question_id, "q2");
        assert_eq!(graded.details[0].options, vec!["a", "b"]);
        assert_eq!(
            graded.details[1].correct_answer,
            AnswerKey::Single("c".to_string())
        );
    }

    #[test]
    fn score_equals_correct_detail_count_and_percentage_rounds() {
        let questions = vec![
            multiple_choice("q1", "1?", &["a", "b"], "a"),
            multiple_choice("q2", "2?", &["a", "b"], "a"),
            multiple_choice("q3", "3?", &["a", "b"], "a"),
        ];

        let graded = grade(&questions, &answers(&["a", "a", "b"]));

        let correct = graded.details.iter().filter(|d| d.is_correct).count() as u32;
        assert_eq!(graded.score, correct);
        // 2/3 -> 66.66… -> 67
        assert_eq!(graded.percentage, Some(67));
    }

    #[test]
    fn zero_questions_has_undefined_percentage() {
        let graded = grade(&[], &[]);

        assert_eq!(graded.score, 0);
        assert_eq!(graded.percentage, None);
        assert!(graded.details.is_empty());
    }
}
