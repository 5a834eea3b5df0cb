// src/gateways/courses.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppError;

/// What the course registry tells the engine about a course. The engine
/// only ever uses this to authorize quiz creation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRef {
    pub id: i64,
    pub title: String,
    pub instructor_id: i64,
    pub is_active: bool,
}

/// Lookup interface over the course registry.
#[async_trait]
pub trait CourseRegistry: Send + Sync {
    async fn course_by_id(&self, course_id: i64) -> Result<Option<CourseRef>, AppError>;
}

/// Registry backed by the shared `courses` table.
pub struct SqlCourseRegistry {
    pool: SqlitePool,
}

impl SqlCourseRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRegistry for SqlCourseRegistry {
    async fn course_by_id(&self, course_id: i64) -> Result<Option<CourseRef>, AppError> {
        let course = sqlx::query_as::<_, CourseRef>(
            r#"
            SELECT id, title, instructor_id, is_active
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Course registry lookup failed: {:?}", e);
            AppError::Upstream(e.to_string())
        })?;

        Ok(course)
    }
}
