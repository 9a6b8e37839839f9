use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use url::Url;
use uuid::Uuid;

use crate::extract;
use crate::joblog::{self, JobLog, LogLevel};
use crate::telemetry::{self};
use crate::telemetry::ops::import::Phase as ImportPhase;

pub mod fetch;
pub mod links;
mod write;
mod types;
mod db;

#[derive(Args)]
pub struct ImportCmd {
    #[arg(long)] pub source: Option<i32>,
    #[arg(long)] pub url: Option<String>,
    #[arg(long, default_value_t = 200)] pub limit: usize,
    #[arg(long)] pub force_refetch: bool,
    #[arg(long, default_value_t = false)] pub apply: bool,
    #[arg(long, default_value_t = 10)] pub plan_limit: usize,
}

pub async fn run(pool: &PgPool, args: ImportCmd) -> Result<()> {
    let log = telemetry::import();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("limit", (args.limit as i64).to_string()),
        ("plan_limit", (args.plan_limit as i64).to_string()),
        ("force_refetch", args.force_refetch.to_string()),
        ("source", format!("{:?}", args.source)),
        ("url", format!("{:?}", args.url)),
    ]).entered();

    // resolve listing sources to import
    let sources = db::select_sources(pool, args.source, args.url.as_deref()).await?;
    if sources.is_empty() {
        log.warn("No sources matched — add one with `kita source add`");
    }

    if !args.apply {
        let mode = if args.force_refetch { "upsert" } else { "insert-only" };
        if telemetry::config::json_mode() {
            use types::{ImportPlan, SourceSample};
            let samples: Vec<SourceSample> = sources.iter().take(args.plan_limit)
                .map(|s| SourceSample { source_id: s.source_id, url: s.url.clone(), name: s.name.clone() })
                .collect();
            let plan = ImportPlan { sources: sources.len(), mode: mode.to_string(), limit: args.limit, sample_sources: samples };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Import plan — sources={} mode={} limit={}", sources.len(), mode, args.limit));
            for s in sources.iter().take(args.plan_limit) { log.info(format!("  source_id={} url={} name={:?}", s.source_id, s.url, s.name)); }
            if sources.len() > args.plan_limit { log.info(format!("  ... ({} more)", sources.len() - args.plan_limit)); }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let client = fetch::client()?;

    let job_id = Uuid::new_v4();
    let job_source = if sources.len() == 1 { Some(sources[0].source_id) } else { None };
    db::create_job(pool, job_id, job_source).await?;
    let job = JobLog::new(job_id);

    let mut total_pages = 0usize;
    let mut total_written = 0usize;
    let mut total_skipped = 0usize;

    use types::SourceSummary;
    let mut per_source: Vec<SourceSummary> = Vec::new();

    for s in &sources {
        let _source_span = log.span_kv(&ImportPhase::Source, [("source_id", s.source_id.to_string()), ("url", s.url.clone())]).entered();
        let mut written = 0usize;
        let mut skipped = 0usize;
        let mut errors = 0usize;

        let base = match Url::parse(&s.url) {
            Ok(u) => u,
            Err(e) => {
                job.error(format!("source {} has an invalid url: {e}", s.source_id));
                continue;
            }
        };

        // fetch the listing page and collect detail links
        let listing = {
            let _s = log.span_kv(&ImportPhase::FetchListing, [("url", s.url.clone())]).entered();
            match fetch::fetch_page(&client, &s.url).await {
                Ok(html) => html,
                Err(e) => {
                    job.error(format!("listing fetch failed for {}: {e:#}", s.url));
                    continue;
                }
            }
        };
        let detail_links = {
            let _s = log.span(&ImportPhase::CollectLinks).entered();
            links::collect_detail_links(&listing, &base)
        };
        job.info(format!("{}: {} detail link(s)", s.url, detail_links.len()));

        for link in detail_links.iter().take(args.limit) {
            total_pages += 1;

            let html = {
                let _s = log.span_kv(&ImportPhase::FetchDetail, [("url", link.to_string())]).entered();
                match fetch::fetch_page(&client, link.as_str()).await {
                    Ok(html) => html,
                    Err(e) => {
                        job.error(format!("detail fetch failed for {link}: {e:#}"));
                        errors += 1;
                        continue;
                    }
                }
            };

            let fields = {
                let _s = log.span_kv(&ImportPhase::Extract, [("url", link.to_string())]).entered();
                extract::extract_facility(&html, link, &job)
            };

            let _ws = log.span_kv(&ImportPhase::WriteFacility, [("mode", if args.force_refetch { "upsert" } else { "insert" }.to_string())]).entered();
            let write_res = if args.force_refetch {
                write::upsert_facility(pool, link.as_str(), &fields, html.as_bytes()).await.map(|_| true)
            } else {
                write::insert_facility(pool, link.as_str(), &fields, html.as_bytes()).await
            };
            match write_res {
                Ok(true) => {
                    written += 1;
                    log.info_kv("➕ write", [("url", link.to_string()), ("name", fields.name.clone().unwrap_or_default())]);
                }
                Ok(false) => {
                    skipped += 1;
                    log.info_kv("↩️ skip", [("url", link.to_string())]);
                }
                Err(e) => {
                    job.error(format!("write failed for {link}: {e:#}"));
                    errors += 1;
                }
            }
        }

        total_written += written;
        total_skipped += skipped;
        log.source_summary(s.source_id, written, skipped, errors);
        per_source.push(SourceSummary { source_id: s.source_id, written, skipped, errors });
    }

    // flush the job's log stream, then derive the final status from it
    let entries = job.take();
    let warnings = entries.iter().filter(|e| e.level == LogLevel::Warn).count();
    let errors = entries.iter().filter(|e| e.level == LogLevel::Error).count();
    {
        let _s = log.span(&ImportPhase::FlushLogs).entered();
        joblog::db::insert_logs(pool, &entries).await?;
    }

    let status = if errors > 0 && total_written == 0 {
        "failed"
    } else if warnings > 0 || errors > 0 {
        "partial"
    } else {
        "completed"
    };
    db::finish_job(pool, job_id, status, total_pages as i32, total_written as i32, warnings as i32, errors as i32).await?;

    log.totals(total_pages, total_written, total_skipped, warnings, errors);
    log.info(format!("🏁 Job {job_id} {status}"));

    if telemetry::config::json_mode() {
        use types::{ImportApply, ImportTotals};
        let result = ImportApply {
            job_id: job_id.to_string(),
            status: status.to_string(),
            totals: ImportTotals { pages: total_pages, written: total_written, skipped: total_skipped, warnings, errors },
            per_source,
        };
        log.result(&result)?;
    }
    Ok(())
}
