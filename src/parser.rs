// src/parser.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::models::question::{AnswerKey, Question, QuestionKind};

/// Literal prefix marking the correct-answer line of a pasted block.
const ANSWER_MARKER: &str = "✅ Correct Answer:";

/// Matches an option line: a letter a-d, a closing parenthesis, whitespace,
/// then the option text.
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-d]\)\s+(.+)$").expect("option pattern is valid"));

/// Parses a pasted block of quiz text into multiple-choice questions.
///
/// The expected shape is repeated blocks of a question line, lettered option
/// lines (`a) ...` through `d) ...`) and a `✅ Correct Answer: <letter>`
/// marker, with blank lines and "Part N" headers interspersed and ignored.
///
/// One forward pass over the trimmed lines:
/// * option lines append their text to the options of the block in progress;
/// * a marker line resolves the letter against the options collected so far
///   (`letter - 'a'`); out-of-range letters are ignored;
/// * any other line closes the block in progress and opens a new one with
///   itself as the question text.
///
/// A block only makes it into the output with at least one option and a
/// resolved correct answer; everything else is dropped without a diagnostic.
/// Ids are `q1`, `q2`, ... numbered by output position. Callers must treat an
/// empty result as "no valid questions found" — the parser itself never fails.
pub fn parse_quiz_text(input: &str) -> Vec<Question> {
    let mut questions: Vec<Question> = Vec::new();
    let mut current_text: Option<String> = None;
    let mut options: Vec<String> = Vec::new();
    let mut correct: Option<String> = None;

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("Part ") {
            continue;
        }

        if let Some(caps) = OPTION_LINE.captures(line) {
            options.push(caps[1].trim().to_string());
        } else if let Some(rest) = line.strip_prefix(ANSWER_MARKER) {
            if let Some(letter) = rest.trim().chars().next() {
                let index = letter as i64 - 'a' as i64;
                if index >= 0 && (index as usize) < options.len() {
                    correct = Some(options[index as usize].clone());
                }
            }
        } else {
            finalize(&mut questions, current_text.take(), &options, correct.take());
            current_text = Some(line.to_string());
            options.clear();
        }
    }

    finalize(&mut questions, current_text, &options, correct);
    questions
}

/// Appends the block in progress if it is complete: question text, at least
/// one option, and a resolved correct answer.
fn finalize(
    questions: &mut Vec<Question>,
    text: Option<String>,
    options: &[String],
    correct: Option<String>,
) {
    let (Some(text), Some(answer)) = (text, correct) else {
        return;
    };
    if options.is_empty() {
        return;
    }

    questions.push(Question {
        id: format!("q{}", questions.len() + 1),
        text,
        kind: QuestionKind::MultipleChoice,
        options: options.to_vec(),
        answer_key: AnswerKey::Single(answer),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANCE_BLOCK: &str = "What is the capital of France?\n\
        a) London\n\
        b) Berlin\n\
        c) Paris\n\
        d) Madrid\n\
        ✅ Correct Answer: c\n";

    #[test]
    fn parses_a_single_well_formed_block() {
        let questions = parse_quiz_text(FRANCE_BLOCK);

        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.id, "q1");
        assert_eq!(q.text, "What is the capital of France?");
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
        assert_eq!(q.options, vec!["London", "Berlin", "Paris", "Madrid"]);
        assert_eq!(q.answer_key, AnswerKey::Single("Paris".to_string()));
    }

    #[test]
    fn parses_blocks_in_source_order_with_sequential_ids() {
        let input = "\
            First question?\n\
            a) one\n\
            b) two\n\
            ✅ Correct Answer: a\n\
            \n\
            Second question?\n\
            a) three\n\
            b) four\n\
            ✅ Correct Answer: b\n";

        let questions = parse_quiz_text(input);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].text, "First question?");
        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Single("one".to_string())
        );
        assert_eq!(questions[1].id, "q2");
        assert_eq!(
            questions[1].answer_key,
            AnswerKey::Single("four".to_string())
        );
    }

    #[test]
    fn skips_part_headers_and_blank_lines() {
        let input = format!("Part 1\n\n{}\nPart 2\n", FRANCE_BLOCK);

        let questions = parse_quiz_text(&input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "What is the capital of France?");
    }

    #[test]
    fn drops_a_block_without_a_marker() {
        let input = "\
            Unanswered question?\n\
            a) one\n\
            b) two\n\
            \n\
            Answered question?\n\
            a) three\n\
            b) four\n\
            ✅ Correct Answer: a\n";

        let questions = parse_quiz_text(input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].text, "Answered question?");
    }

    #[test]
    fn drops_a_block_without_options() {
        let input = "\
            Optionless question?\n\
            ✅ Correct Answer: a\n";

        assert!(parse_quiz_text(input).is_empty());
    }

    #[test]
    fn ignores_an_out_of_range_marker_letter() {
        let input = "\
            Two options only?\n\
            a) one\n\
            b) two\n\
            ✅ Correct Answer: d\n";

        assert!(parse_quiz_text(input).is_empty());
    }

    #[test]
    fn marker_before_any_option_is_ignored() {
        let input = "\
            Question first?\n\
            ✅ Correct Answer: a\n\
            a) late option\n";

        // The marker resolved against an empty list, so the block never
        // gains a correct answer.
        assert!(parse_quiz_text(input).is_empty());
    }

    #[test]
    fn consecutive_question_lines_drop_the_incomplete_block() {
        let input = "\
            Abandoned question?\n\
            Real question?\n\
            a) one\n\
            b) two\n\
            ✅ Correct Answer: b\n";

        let questions = parse_quiz_text(input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Real question?");
        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Single("two".to_string())
        );
    }

    #[test]
    fn a_block_with_fewer_than_four_options_still_parses() {
        let input = "\
            Short block?\n\
            a) only\n\
            ✅ Correct Answer: a\n";

        let questions = parse_quiz_text(input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["only"]);
        assert_eq!(
            questions[0].answer_key,
            AnswerKey::Single("only".to_string())
        );
    }

    #[test]
    fn text_with_no_valid_blocks_yields_an_empty_sequence() {
        assert!(parse_quiz_text("").is_empty());
        assert!(parse_quiz_text("just some prose\nacross two lines\n").is_empty());
    }

    #[test]
    fn answer_key_is_always_drawn_from_the_options() {
        let input = "\
            Q1?\n\
            a) alpha\n\
            b) beta\n\
            c) gamma\n\
            ✅ Correct Answer: b\n\
            Q2?\n\
            a) delta\n\
            b) epsilon\n\
            ✅ Correct Answer: a\n";

        for q in parse_quiz_text(input) {
            let AnswerKey::Single(answer) = &q.answer_key else {
                panic!("parser only emits single answers");
            };
            assert!(q.options.contains(answer));
        }
    }
}
