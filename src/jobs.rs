use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::joblog::{self, LogLevel};
use crate::telemetry::{self};
use crate::telemetry::ops::jobs::Phase as JobsPhase;

/// kita jobs — list recent import jobs
#[derive(Args)]
pub struct JobsCmd {
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}

/// kita logs — print one job's log stream
#[derive(Args)]
pub struct LogsCmd {
    #[arg(long)]
    pub job: Uuid,
    /// Filter by level: debug/info/warn/error
    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Serialize)]
pub struct JobRow {
    pub job_id: Uuid,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub pages_seen: i32,
    pub facilities_written: i32,
    pub warnings: i32,
    pub errors: i32,
}

#[derive(Serialize)]
pub struct JobList { pub jobs: Vec<JobRow> }

pub async fn run_jobs(pool: &PgPool, args: JobsCmd) -> Result<()> {
    let log = telemetry::jobs();
    let _g = log.root_span_kv([("limit", args.limit.to_string())]).entered();
    let _s = log.span(&JobsPhase::List).entered();

    let rows = sqlx::query(
        r#"
        SELECT job_id, status, started_at, finished_at,
               pages_seen, facilities_written, warnings, errors
        FROM import_job
        ORDER BY started_at DESC
        LIMIT $1
        "#,
    )
    .bind(args.limit)
    .fetch_all(pool)
    .await?;

    let jobs: Vec<JobRow> = rows
        .into_iter()
        .map(|r| JobRow {
            job_id: r.get("job_id"),
            status: r.get("status"),
            started_at: r.get("started_at"),
            finished_at: r.get("finished_at"),
            pages_seen: r.get("pages_seen"),
            facilities_written: r.get("facilities_written"),
            warnings: r.get("warnings"),
            errors: r.get("errors"),
        })
        .collect();

    log.info("🗂 Jobs:");
    for j in &jobs {
        log.info(format!(
            "{} {} started={} pages={} written={} warnings={} errors={}",
            j.job_id, j.status, j.started_at, j.pages_seen, j.facilities_written, j.warnings, j.errors
        ));
    }
    if telemetry::config::json_mode() {
        log.result(&JobList { jobs })?;
    }
    Ok(())
}

#[derive(Serialize)]
pub struct LogLine { pub level: String, pub message: String, pub created_at: DateTime<Utc> }

#[derive(Serialize)]
pub struct LogStream { pub job_id: Uuid, pub entries: Vec<LogLine> }

pub async fn run_logs(pool: &PgPool, args: LogsCmd) -> Result<()> {
    let log = telemetry::jobs();
    let _g = log.root_span_kv([("job", args.job.to_string())]).entered();
    let _s = log.span(&JobsPhase::Logs).entered();

    let level = match args.level.as_deref() {
        None => None,
        Some(s) => match LogLevel::parse(s) {
            Some(l) => Some(l),
            None => bail!("Unknown log level: {}", s),
        },
    };

    let rows = joblog::db::select_logs(pool, args.job, level).await?;
    for r in &rows {
        let line = format!("{} [{}] {}", r.created_at, r.level, r.message);
        match LogLevel::parse(&r.level) {
            Some(LogLevel::Warn) => log.warn(line),
            Some(LogLevel::Error) => log.error(line),
            _ => log.info(line),
        }
    }
    if rows.is_empty() {
        log.info(format!("No log entries for job {}", args.job));
    }
    if telemetry::config::json_mode() {
        let entries = rows
            .into_iter()
            .map(|r| LogLine { level: r.level, message: r.message, created_at: r.created_at })
            .collect();
        log.result(&LogStream { job_id: args.job, entries })?;
    }
    Ok(())
}
