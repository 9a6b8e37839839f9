use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{LogEntry, LogLevel};

pub async fn insert_logs(pool: &PgPool, entries: &[LogEntry]) -> Result<()> {
    if entries.is_empty() { return Ok(()); }
    let mut tx = pool.begin().await?;
    for e in entries {
        sqlx::query(
            "INSERT INTO import_log (job_id, level, message, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(e.job_id)
        .bind(e.level.as_str())
        .bind(&e.message)
        .bind(e.created_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub struct LogRow {
    pub level: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn select_logs(pool: &PgPool, job_id: Uuid, level: Option<LogLevel>) -> Result<Vec<LogRow>> {
    let rows = sqlx::query(
        r#"
        SELECT level, message, created_at
        FROM import_log
        WHERE job_id = $1 AND ($2::TEXT IS NULL OR level = $2::TEXT)
        ORDER BY log_id
        "#,
    )
    .bind(job_id)
    .bind(level.map(|l| l.as_str()))
    .fetch_all(pool)
    .await?;

    let out = rows
        .into_iter()
        .map(|r| LogRow {
            level: r.get("level"),
            message: r.get("message"),
            created_at: r.get("created_at"),
        })
        .collect();
    Ok(out)
}
