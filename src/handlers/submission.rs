// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::prelude::FromRow;

use crate::{
    error::AppError,
    gateways::identity::AuthUser,
    grading::grade_submission,
    models::{
        question::AnswerKey,
        quiz::PageParams,
        submission::{
            MySubmissionRow, MySubmissionView, SubmissionReceipt, SubmissionRow, SubmissionStats,
            SubmitQuizRequest,
        },
    },
    state::AppState,
};

/// Quiz fields the grader needs.
#[derive(FromRow)]
struct QuizForGrading {
    id: i64,
    passing_score: i64,
    is_active: bool,
}

/// Quiz fields the results view needs.
#[derive(FromRow)]
struct QuizForResults {
    id: i64,
    title: String,
    instructor_id: i64,
    passing_score: i64,
}

/// Submits a learner's answers and grades them in one transaction.
///
/// * A learner gets exactly one attempt per quiz. The existence pre-check
///   gives the friendly early answer, but the UNIQUE(quiz_id, user_id)
///   constraint is the final arbiter: when two requests race, the loser's
///   insert fails and is mapped to the same `Conflict`.
/// * The transaction starts IMMEDIATE. A deferred transaction would take a
///   read lock first and hit SQLITE_BUSY on the write upgrade when two
///   submissions race across pool connections; taking the write lock up
///   front makes the loser wait at begin and then see the winner's row.
/// * Grading runs against the questions as stored right now, never against
///   anything the client sent.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path((_course_id, quiz_id)): Path<(i64, i64)>,
    user: AuthUser,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.answers.keys().any(|&question_id| question_id <= 0) {
        return Err(AppError::BadRequest(
            "Question ids must be positive integers".to_string(),
        ));
    }

    let time_spent = payload.time_spent.unwrap_or(0).clamp(0, 7200);

    let mut tx = state.pool.begin_with("BEGIN IMMEDIATE").await?;

    let quiz = sqlx::query_as::<_, QuizForGrading>(
        "SELECT id, passing_score, is_active FROM quizzes WHERE id = $1",
    )
    .bind(quiz_id)
    .fetch_optional(&mut *tx)
    .await?
    .filter(|q| q.is_active)
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM quiz_submissions WHERE quiz_id = $1 AND user_id = $2",
    )
    .bind(quiz.id)
    .bind(user.id)
    .fetch_optional(&mut *tx)
    .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Quiz already completed".to_string()));
    }

    let keys = sqlx::query_as::<_, AnswerKey>(
        "SELECT id, correct_answer FROM questions WHERE quiz_id = $1",
    )
    .bind(quiz.id)
    .fetch_all(&mut *tx)
    .await?;

    let outcome = grade_submission(&keys, &payload.answers, quiz.passing_score);

    let answers_json = serde_json::to_string(&payload.answers)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let submission_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quiz_submissions
            (quiz_id, user_id, answers, score, correct_answers, total_questions, passed, time_spent)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(quiz.id)
    .bind(user.id)
    .bind(&answers_json)
    .bind(outcome.score)
    .bind(outcome.correct_answers)
    .bind(outcome.total_questions)
    .bind(outcome.passed)
    .bind(time_spent)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        // A concurrent request won the race; report it as the same conflict
        // the pre-check would have produced.
        if e.as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation())
        {
            AppError::Conflict("Quiz already completed".to_string())
        } else {
            tracing::error!("Failed to insert quiz submission: {:?}", e);
            AppError::from(e)
        }
    })?;

    tx.commit().await?;

    tracing::info!(
        "User {} submitted quiz {}: {}/{} correct, score {}",
        user.id,
        quiz.id,
        outcome.correct_answers,
        outcome.total_questions,
        outcome.score
    );

    let receipt = SubmissionReceipt {
        id: submission_id,
        score: outcome.score,
        correct_answers: outcome.correct_answers,
        total_questions: outcome.total_questions,
        passed: outcome.passed,
        passing_score: quiz.passing_score,
    };

    Ok(Json(serde_json::json!({
        "message": "Quiz completed successfully",
        "submission": receipt,
    })))
}

/// Returns a page of a quiz's submissions plus summary statistics for the
/// owning instructor.
pub async fn quiz_results(
    State(state): State<AppState>,
    Path((_course_id, quiz_id)): Path<(i64, i64)>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_instructor() {
        return Err(AppError::Forbidden("Instructor role required".to_string()));
    }

    let quiz = sqlx::query_as::<_, QuizForResults>(
        "SELECT id, title, instructor_id, passing_score FROM quizzes WHERE id = $1",
    )
    .bind(quiz_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    if quiz.instructor_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "You do not have permission for this quiz".to_string(),
        ));
    }

    let (page, limit, offset) = params.normalize(20, 100);

    let total_items = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM quiz_submissions WHERE quiz_id = $1",
    )
    .bind(quiz.id)
    .fetch_one(&state.pool)
    .await?;

    let submissions = sqlx::query_as::<_, SubmissionRow>(
        r#"
        SELECT id, user_id, score, correct_answers, total_questions, passed,
               time_spent, submitted_at
        FROM quiz_submissions
        WHERE quiz_id = $1
        ORDER BY submitted_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(quiz.id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let stats = SubmissionStats::over_page(total_items, &submissions);

    Ok(Json(serde_json::json!({
        "quiz": {
            "id": quiz.id,
            "title": quiz.title,
            "passingScore": quiz.passing_score,
        },
        "stats": stats,
        "submissions": submissions,
        "pagination": {
            "currentPage": page,
            "totalPages": (total_items + limit - 1) / limit,
            "totalItems": total_items,
        },
    })))
}

/// Returns all of the caller's submissions for a course's quizzes, newest
/// first, each paired with its quiz title and passing score.
pub async fn my_submissions(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, MySubmissionRow>(
        r#"
        SELECT s.id, s.score, s.correct_answers, s.total_questions, s.passed,
               s.submitted_at, q.id AS quiz_id, q.title AS quiz_title, q.passing_score
        FROM quiz_submissions s
        JOIN quizzes q ON q.id = s.quiz_id
        WHERE q.course_id = $1 AND s.user_id = $2
        ORDER BY s.submitted_at DESC, s.id DESC
        "#,
    )
    .bind(course_id)
    .bind(user.id)
    .fetch_all(&state.pool)
    .await?;

    let submissions: Vec<MySubmissionView> = rows.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({ "submissions": submissions })))
}
