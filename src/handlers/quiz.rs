// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::Sqlite;
use validator::Validate;

use crate::{
    error::AppError,
    gateways::identity::AuthUser,
    models::{
        question::{Question, RedactedQuestion},
        quiz::{
            CourseInfo, CreateQuizRequest, PageParams, Quiz, QuizSummary, QuizView,
            QuizWithQuestions,
        },
    },
    state::AppState,
};

/// Creates a quiz together with its questions in one transaction.
///
/// * Caller must hold the instructor role and own the referenced course
///   (administrators bypass the ownership check).
/// * The quiz row and all question rows commit together or not at all;
///   a quiz is never left without its questions.
/// * Question order is stamped from array position (1-based).
/// * Returns 201 with the full quiz, correct answers included: the creator
///   is trusted.
pub async fn create_quiz(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    user: AuthUser,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_instructor() {
        return Err(AppError::Forbidden("Instructor role required".to_string()));
    }

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let course = state
        .courses
        .course_by_id(course_id)
        .await?
        .ok_or(AppError::NotFound("Course not found".to_string()))?;

    if course.instructor_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "You do not have permission for this course".to_string(),
        ));
    }

    let passing_score = payload.passing_score.unwrap_or(60).clamp(0, 100);
    let total_questions = payload.questions.as_ref().map_or(0, |q| q.len()) as i64;

    let mut tx = state.pool.begin().await?;

    let quiz = sqlx::query_as::<_, Quiz>(
        r#"
        INSERT INTO quizzes (title, description, course_id, instructor_id, total_questions, passing_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, course_id, instructor_id, is_active,
                  total_questions, passing_score, created_at
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(course_id)
    .bind(user.id)
    .bind(total_questions)
    .bind(passing_score)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert quiz: {:?}", e);
        AppError::from(e)
    })?;

    if let Some(questions) = &payload.questions {
        let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
            "INSERT INTO questions (quiz_id, question_text, option_a, option_b, option_c, \
             option_d, correct_answer, explanation, display_order) ",
        );

        query_builder.push_values(questions.iter().enumerate(), |mut row, (index, q)| {
            row.push_bind(quiz.id)
                .push_bind(&q.question_text)
                .push_bind(&q.option_a)
                .push_bind(&q.option_b)
                .push_bind(&q.option_c)
                .push_bind(&q.option_d)
                .push_bind(q.correct_answer)
                .push_bind(&q.explanation)
                .push_bind((index + 1) as i64);
        });

        query_builder.build().execute(&mut *tx).await.map_err(|e| {
            tracing::error!("Failed to insert quiz questions: {:?}", e);
            AppError::from(e)
        })?;
    }

    tx.commit().await?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, question_text, option_a, option_b, option_c, option_d,
               correct_answer, explanation, display_order, created_at
        FROM questions
        WHERE quiz_id = $1
        ORDER BY display_order ASC, id ASC
        "#,
    )
    .bind(quiz.id)
    .fetch_all(&state.pool)
    .await?;

    tracing::info!(
        "Quiz {} created for course {} with {} questions",
        quiz.id,
        course_id,
        questions.len()
    );

    Ok((StatusCode::CREATED, Json(QuizWithQuestions { quiz, questions })))
}

/// Lists a course's active quizzes, newest first, with live question counts.
pub async fn list_course_quizzes(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = params.normalize(10, 50);

    let total_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM quizzes WHERE course_id = $1 AND is_active = TRUE",
    )
    .bind(course_id)
    .fetch_one(&state.pool)
    .await?;

    let quizzes = sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT q.id, q.title, q.description, q.course_id, q.instructor_id, q.is_active,
               q.total_questions, q.passing_score, q.created_at,
               (SELECT COUNT(*) FROM questions WHERE quiz_id = q.id) AS question_count
        FROM quizzes q
        WHERE q.course_id = $1 AND q.is_active = TRUE
        ORDER BY q.created_at DESC, q.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(course_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(serde_json::json!({
        "quizzes": quizzes,
        "totalCount": total_count,
        "currentPage": page,
        "totalPages": (total_count + limit - 1) / limit,
    })))
}

/// Retrieves a quiz for a learner.
///
/// Questions come back redacted: the correct answer and explanation never
/// leave the server in this view. Inactive quizzes are indistinguishable
/// from missing ones.
pub async fn get_quiz(
    State(state): State<AppState>,
    Path((_course_id, quiz_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, title, description, course_id, instructor_id, is_active,
               total_questions, passing_score, created_at
        FROM quizzes
        WHERE id = $1 AND is_active = TRUE
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let questions = sqlx::query_as::<_, RedactedQuestion>(
        r#"
        SELECT id, question_text, option_a, option_b, option_c, option_d, display_order
        FROM questions
        WHERE quiz_id = $1
        ORDER BY display_order ASC, id ASC
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&state.pool)
    .await?;

    let course = state
        .courses
        .course_by_id(quiz.course_id)
        .await?
        .map(|c| CourseInfo {
            id: c.id,
            title: c.title,
            instructor_id: c.instructor_id,
        });

    Ok(Json(QuizView {
        quiz,
        course,
        questions,
    }))
}
