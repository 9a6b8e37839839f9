use anyhow::Result;
use sqlx::{PgPool, Row};

use crate::extract::FacilityFields;

pub async fn upsert_facility(
    pool: &PgPool,
    source_url: &str,
    fields: &FacilityFields,
    raw_html: &[u8],
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        INSERT INTO facility (source_url, name, street, zip, city, phone, email, website,
            concept, focus, hours, benefits, certifications, awards, gallery, video_url,
            fetched_at, raw_html)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, now(), $17)
        ON CONFLICT (source_url) DO UPDATE
          SET name           = EXCLUDED.name,
              street         = EXCLUDED.street,
              zip            = EXCLUDED.zip,
              city           = EXCLUDED.city,
              phone          = EXCLUDED.phone,
              email          = EXCLUDED.email,
              website        = EXCLUDED.website,
              concept        = EXCLUDED.concept,
              focus          = EXCLUDED.focus,
              hours          = EXCLUDED.hours,
              benefits       = EXCLUDED.benefits,
              certifications = EXCLUDED.certifications,
              awards         = EXCLUDED.awards,
              gallery        = EXCLUDED.gallery,
              video_url      = EXCLUDED.video_url,
              fetched_at     = now(),
              raw_html       = EXCLUDED.raw_html
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(source_url)
    .bind(&fields.name)
    .bind(&fields.street)
    .bind(&fields.zip)
    .bind(&fields.city)
    .bind(&fields.phone)
    .bind(&fields.email)
    .bind(&fields.website)
    .bind(&fields.concept)
    .bind(&fields.focus)
    .bind(&fields.hours)
    .bind(&fields.benefits)
    .bind(&fields.certifications)
    .bind(&fields.awards)
    .bind(&fields.gallery)
    .bind(&fields.video_url)
    .bind(raw_html)
    .fetch_one(pool)
    .await?;
    Ok(row.get::<bool, _>("inserted"))
}

pub async fn insert_facility(
    pool: &PgPool,
    source_url: &str,
    fields: &FacilityFields,
    raw_html: &[u8],
) -> Result<bool> {
    let res = sqlx::query(
        r#"
        INSERT INTO facility (source_url, name, street, zip, city, phone, email, website,
            concept, focus, hours, benefits, certifications, awards, gallery, video_url,
            fetched_at, raw_html)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, now(), $17)
        ON CONFLICT (source_url) DO NOTHING
        "#,
    )
    .bind(source_url)
    .bind(&fields.name)
    .bind(&fields.street)
    .bind(&fields.zip)
    .bind(&fields.city)
    .bind(&fields.phone)
    .bind(&fields.email)
    .bind(&fields.website)
    .bind(&fields.concept)
    .bind(&fields.focus)
    .bind(&fields.hours)
    .bind(&fields.benefits)
    .bind(&fields.certifications)
    .bind(&fields.awards)
    .bind(&fields.gallery)
    .bind(&fields.video_url)
    .bind(raw_html)
    .execute(pool)
    .await?;
    Ok(res.rows_affected() == 1)
}
