// src/utils/export.rs

use crate::models::result::QuizResult;

/// Quotes a CSV field, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn percent_display(score: u32, total: u32) -> String {
    if total == 0 {
        return "N/A".to_string();
    }
    format!("{:.1}%", f64::from(score) * 100.0 / f64::from(total))
}

/// Renders a result as CSV: one row per graded question, a blank line, then
/// the total-score line.
pub fn results_csv(result: &QuizResult) -> String {
    let mut rows = vec!["Question,Your Answer,Correct Answer,Result".to_string()];

    for detail in &result.detailed_answers {
        rows.push(
            [
                csv_field(&detail.question_text),
                csv_field(&detail.user_answer),
                csv_field(&detail.correct_answer.display()),
                if detail.is_correct { "Correct" } else { "Incorrect" }.to_string(),
            ]
            .join(","),
        );
    }

    rows.push(String::new());
    rows.push(format!(
        "Total Score,{},{},{}",
        result.score,
        result.total_questions,
        percent_display(result.score, result.total_questions)
    ));

    rows.join("\n")
}

/// Renders a result as a plain-text report: a header with the respondent,
/// quiz and aggregate score, then one block per graded question.
pub fn results_text(result: &QuizResult, user_name: &str) -> String {
    let mut content = format!("Quiz Results for {}\n\n", user_name);
    content.push_str(&format!("Quiz: {}\n", result.quiz_title));
    content.push_str(&format!(
        "Date: {}\n",
        result.submitted_at.format("%Y-%m-%d")
    ));
    content.push_str(&format!(
        "Score: {}/{} ({})\n\n",
        result.score,
        result.total_questions,
        percent_display(result.score, result.total_questions)
    ));

    content.push_str("Detailed Results:\n");
    content.push_str(&"=".repeat(50));
    content.push_str("\n\n");

    for (index, detail) in result.detailed_answers.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", index + 1, detail.question_text));
        content.push_str(&format!("Your Answer: {}\n", detail.user_answer));
        content.push_str(&format!(
            "Correct Answer: {}\n",
            detail.correct_answer.display()
        ));
        content.push_str(&format!(
            "Result: {}\n\n",
            if detail.is_correct { "Correct" } else { "Incorrect" }
        ));
    }

    content
}
