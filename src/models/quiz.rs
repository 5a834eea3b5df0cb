// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::question::{Question, QuestionSpec, RedactedQuestion};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub instructor_id: i64,

    /// Inactive quizzes are invisible to learners and reject submissions.
    pub is_active: bool,

    /// Denormalized question count, fixed at creation time.
    pub total_questions: i64,

    /// Minimum score (0-100) required for a submission to pass.
    pub passing_score: i64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a quiz together with its questions.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Title must be between 3 and 100 characters."
    ))]
    pub title: String,

    #[validate(length(max = 500, message = "Description may have at most 500 characters."))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Passing score must be between 0 and 100."))]
    pub passing_score: Option<i64>,

    #[validate(
        length(min = 1, max = 50, message = "A quiz may have between 1 and 50 questions."),
        nested
    )]
    pub questions: Option<Vec<QuestionSpec>>,
}

/// Creator-facing response: the full quiz with unredacted questions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// Display projection of the owning course, fetched at read time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub id: i64,
    pub title: String,
    pub instructor_id: i64,
}

/// Learner-facing quiz detail: questions are redacted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub course: Option<CourseInfo>,
    pub questions: Vec<RedactedQuestion>,
}

/// One row of the course quiz listing, with its live question count.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub quiz: Quiz,
    pub question_count: i64,
}

/// Pagination query parameters shared by the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Normalized (page, limit, offset) with the given default and cap.
    pub fn normalize(&self, default_limit: i64, max_limit: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, max_limit);
        (page, limit, (page - 1) * limit)
    }
}
