use anyhow::Result;
use sqlx::{PgPool, Row};

use super::types::SourceRow;

pub async fn upsert_source(
    pool: &PgPool,
    url: &str,
    name: Option<&str>,
    state: Option<&str>,
    active: bool,
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        INSERT INTO source (url, name, state, is_active)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (url)
        DO UPDATE SET name = EXCLUDED.name, state = EXCLUDED.state, is_active = EXCLUDED.is_active
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(url)
    .bind(name)
    .bind(state)
    .bind(active)
    .fetch_one(pool)
    .await?;
    Ok(row.get::<bool, _>("inserted"))
}

pub async fn list_sources(pool: &PgPool, active: Option<bool>) -> Result<Vec<SourceRow>> {
    let rows = sqlx::query(
        r#"
        SELECT source_id, url, name, state, is_active, added_at
        FROM source
        WHERE ($1::bool IS NULL OR is_active = $1)
        ORDER BY source_id
        "#,
    )
    .bind(active)
    .fetch_all(pool)
    .await?;

    let sources = rows
        .into_iter()
        .map(|r| SourceRow {
            source_id: r.get("source_id"),
            url: r.get("url"),
            name: r.get("name"),
            state: r.get("state"),
            is_active: r.get("is_active"),
            added_at: r.get("added_at"),
        })
        .collect();
    Ok(sources)
}
