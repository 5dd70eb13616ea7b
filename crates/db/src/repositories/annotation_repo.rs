//! Repository for the `annotations` table.

use heatlog_core::types::DbId;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::annotation::{Annotation, NewAnnotation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, log_id, position, annotation_type, note, comment, depth, hash, \
                       inspector, user_name, user_role, user_color, created_at";

/// Provides data access for log annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert one annotation bound to `log_id`.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
        input: &NewAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (log_id, position, annotation_type, note, comment, depth, \
                                      hash, inspector, user_name, user_role, user_color) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(log_id)
            .bind(input.position)
            .bind(&input.annotation_type)
            .bind(&input.note)
            .bind(&input.comment)
            .bind(input.depth)
            .bind(&input.hash)
            .bind(&input.inspector)
            .bind(&input.user_name)
            .bind(&input.user_role)
            .bind(&input.user_color)
            .fetch_one(executor)
            .await
    }

    /// List one log's annotations ascending by position.
    pub async fn list_by_log<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE log_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(log_id)
            .fetch_all(executor)
            .await
    }

    /// List the annotations of several logs in one round trip.
    ///
    /// Rows are ordered by log then position; callers group them by `log_id`.
    pub async fn list_by_logs<'e, E: PgExecutor<'e>>(
        executor: E,
        log_ids: &[String],
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE log_id = ANY($1) \
             ORDER BY log_id, position, id"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(log_ids)
            .fetch_all(executor)
            .await
    }

    /// Delete every annotation of a log. Returns the number of rows removed.
    pub async fn delete_by_log<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE log_id = $1")
            .bind(log_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete one annotation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
