// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// One of the four option tags a multiple-choice question can name as
/// correct, and the only values a learner may submit as an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum AnswerTag {
    A,
    B,
    C,
    D,
}

/// Represents the 'questions' table in the database.
/// This is the full row, correct answer included; it is only serialized
/// back to the instructor who created the quiz.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: AnswerTag,
    pub explanation: Option<String>,
    /// 1-based position within the quiz, stamped at creation time.
    #[serde(rename = "order")]
    pub display_order: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Learner-facing question view: the correct answer and explanation are
/// never present in this shape, not even as nulls.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RedactedQuestion {
    pub id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    #[serde(rename = "order")]
    pub display_order: i64,
}

/// Minimal projection used by the grader: question id plus its answer key.
#[derive(Debug, FromRow)]
pub struct AnswerKey {
    pub id: i64,
    pub correct_answer: AnswerTag,
}

/// DTO for one question inside a quiz-creation request. The display order
/// is not accepted from the caller; it is derived from array position.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Question text must be between 10 and 1000 characters."
    ))]
    pub question_text: String,
    #[validate(length(min = 1, max = 200, message = "Option A must be between 1 and 200 characters."))]
    pub option_a: String,
    #[validate(length(min = 1, max = 200, message = "Option B must be between 1 and 200 characters."))]
    pub option_b: String,
    #[validate(length(min = 1, max = 200, message = "Option C must be between 1 and 200 characters."))]
    pub option_c: String,
    #[validate(length(min = 1, max = 200, message = "Option D must be between 1 and 200 characters."))]
    pub option_d: String,
    pub correct_answer: AnswerTag,
    #[validate(length(max = 500, message = "Explanation may have at most 500 characters."))]
    pub explanation: Option<String>,
}
