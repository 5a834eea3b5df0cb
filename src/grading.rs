// src/grading.rs

use std::collections::HashMap;

use crate::models::question::{AnswerKey, AnswerTag};

/// Outcome of grading one submission against a quiz's answer keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOutcome {
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub passed: bool,
}

/// Grades a submission. Pure computation: no I/O, no side effects.
///
/// Every question belonging to the quiz counts toward the total; an answer
/// the learner did not supply is wrong. Score is the percentage of correct
/// answers rounded to the nearest integer, or 0 for a quiz with no
/// questions.
pub fn grade_submission(
    keys: &[AnswerKey],
    answers: &HashMap<i64, AnswerTag>,
    passing_score: i64,
) -> GradeOutcome {
    let total_questions = keys.len() as i64;

    let correct_answers = keys
        .iter()
        .filter(|key| answers.get(&key.id) == Some(&key.correct_answer))
        .count() as i64;

    let score = if total_questions > 0 {
        ((correct_answers as f64 / total_questions as f64) * 100.0).round() as i64
    } else {
        0
    };

    GradeOutcome {
        score,
        correct_answers,
        total_questions,
        passed: score >= passing_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tags: &[AnswerTag]) -> Vec<AnswerKey> {
        tags.iter()
            .enumerate()
            .map(|(i, &correct_answer)| AnswerKey {
                id: (i + 1) as i64,
                correct_answer,
            })
            .collect()
    }

    #[test]
    fn three_of_five_scores_sixty_and_passes() {
        use AnswerTag::*;
        let keys = keys(&[A, B, C, D, A]);
        let answers = HashMap::from([(1, A), (2, B), (3, C), (4, A), (5, B)]);

        let outcome = grade_submission(&keys, &answers, 60);

        assert_eq!(outcome.score, 60);
        assert_eq!(outcome.correct_answers, 3);
        assert_eq!(outcome.total_questions, 5);
        assert!(outcome.passed);
    }

    #[test]
    fn two_of_five_scores_forty_and_fails() {
        use AnswerTag::*;
        let keys = keys(&[A, B, C, D, A]);
        let answers = HashMap::from([(1, A), (2, B), (3, D), (4, A), (5, B)]);

        let outcome = grade_submission(&keys, &answers, 60);

        assert_eq!(outcome.score, 40);
        assert!(!outcome.passed);
    }

    #[test]
    fn missing_answers_are_wrong() {
        use AnswerTag::*;
        let keys = keys(&[A, B, C]);
        let answers = HashMap::from([(1, A)]);

        let outcome = grade_submission(&keys, &answers, 60);

        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.score, 33);
    }

    #[test]
    fn answers_for_foreign_questions_are_ignored() {
        use AnswerTag::*;
        let keys = keys(&[A, B]);
        // Question 99 does not belong to this quiz.
        let answers = HashMap::from([(1, A), (99, B)]);

        let outcome = grade_submission(&keys, &answers, 60);

        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.score, 50);
    }

    #[test]
    fn score_rounds_to_nearest_integer() {
        use AnswerTag::*;
        let keys = keys(&[A, B, C, D, A, B]);
        let answers = HashMap::from([(1, A)]);

        // 1/6 = 16.66... -> 17
        let outcome = grade_submission(&keys, &answers, 60);
        assert_eq!(outcome.score, 17);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let outcome = grade_submission(&[], &HashMap::new(), 60);

        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total_questions, 0);
        assert!(!outcome.passed);
    }

    #[test]
    fn empty_quiz_passes_when_passing_score_is_zero() {
        let outcome = grade_submission(&[], &HashMap::new(), 0);

        assert_eq!(outcome.score, 0);
        assert!(outcome.passed);
    }

    #[test]
    fn exact_passing_score_passes() {
        use AnswerTag::*;
        let keys = keys(&[A, B]);
        let answers = HashMap::from([(1, A)]);

        let outcome = grade_submission(&keys, &answers, 50);

        assert_eq!(outcome.score, 50);
        assert!(outcome.passed);
    }
}
