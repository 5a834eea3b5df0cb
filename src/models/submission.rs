// src/models/submission.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::models::question::AnswerTag;

/// DTO for submitting quiz answers.
///
/// `answers` maps question ids to the chosen option tag. Questions the
/// learner leaves out are simply graded as wrong.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub answers: HashMap<i64, AnswerTag>,

    /// Seconds spent on the quiz; clamped to [0, 7200] server-side.
    pub time_spent: Option<i64>,
}

/// Grading summary returned to the learner right after submission.
/// No per-question breakdown is exposed here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: i64,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub passed: bool,
    pub passing_score: i64,
}

/// One row of the instructor results page. The raw answers map stays in
/// the ledger; it is not part of this projection.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: i64,
    pub user_id: i64,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub passed: bool,
    pub time_spent: i64,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Summary statistics for a results page.
///
/// averageScore and passRate cover the returned page only, not the whole
/// submission population. That matches the reference behavior and is
/// recorded as a known limitation in DESIGN.md.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total_submissions: i64,
    pub average_score: i64,
    pub pass_rate: i64,
}

impl SubmissionStats {
    pub fn over_page(total_submissions: i64, page: &[SubmissionRow]) -> Self {
        if page.is_empty() {
            return Self {
                total_submissions,
                average_score: 0,
                pass_rate: 0,
            };
        }

        let count = page.len() as f64;
        let score_sum: i64 = page.iter().map(|s| s.score).sum();
        let passed = page.iter().filter(|s| s.passed).count() as f64;

        Self {
            total_submissions,
            average_score: (score_sum as f64 / count).round() as i64,
            pass_rate: (passed / count * 100.0).round() as i64,
        }
    }
}

/// Joined row backing the learner's my-submissions view.
#[derive(Debug, FromRow)]
pub struct MySubmissionRow {
    pub id: i64,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub passed: bool,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub passing_score: i64,
}

/// Quiz identity attached to each my-submissions entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizBrief {
    pub id: i64,
    pub title: String,
    pub passing_score: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MySubmissionView {
    pub id: i64,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub passed: bool,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub quiz: QuizBrief,
}

impl From<MySubmissionRow> for MySubmissionView {
    fn from(row: MySubmissionRow) -> Self {
        Self {
            id: row.id,
            score: row.score,
            correct_answers: row.correct_answers,
            total_questions: row.total_questions,
            passed: row.passed,
            submitted_at: row.submitted_at,
            quiz: QuizBrief {
                id: row.quiz_id,
                title: row.quiz_title,
                passing_score: row.passing_score,
            },
        }
    }
}
