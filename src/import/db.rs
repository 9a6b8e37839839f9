use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct ImportSourceRow {
    pub source_id: i32,
    pub url: String,
    pub name: Option<String>,
}

pub async fn select_sources(
    pool: &PgPool,
    source: Option<i32>,
    source_url: Option<&str>,
) -> Result<Vec<ImportSourceRow>> {
    let rows = sqlx::query(
        r#"
        SELECT source_id, url, name
        FROM source
        WHERE
          ($1::INT4 IS NULL OR source_id = $1::INT4) AND
          ($2::TEXT IS NULL OR url       = $2::TEXT) AND
          ($1::INT4 IS NOT NULL OR $2::TEXT IS NOT NULL OR is_active = TRUE)
        ORDER BY source_id
        "#,
    )
    .bind(source)
    .bind(source_url)
    .fetch_all(pool)
    .await?;

    let out = rows
        .into_iter()
        .map(|r| ImportSourceRow {
            source_id: r.get("source_id"),
            url: r.get("url"),
            name: r.get("name"),
        })
        .collect();
    Ok(out)
}

pub async fn create_job(pool: &PgPool, job_id: Uuid, source_id: Option<i32>) -> Result<()> {
    sqlx::query("INSERT INTO import_job (job_id, source_id, status) VALUES ($1, $2, 'running')")
        .bind(job_id)
        .bind(source_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn finish_job(
    pool: &PgPool,
    job_id: Uuid,
    status: &str,
    pages_seen: i32,
    facilities_written: i32,
    warnings: i32,
    errors: i32,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE import_job
        SET finished_at = now(), status = $2,
            pages_seen = $3, facilities_written = $4, warnings = $5, errors = $6
        WHERE job_id = $1
        "#,
    )
    .bind(job_id)
    .bind(status)
    .bind(pages_seen)
    .bind(facilities_written)
    .bind(warnings)
    .bind(errors)
    .execute(pool)
    .await?;
    Ok(())
}
