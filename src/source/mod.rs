use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use sqlx::PgPool;
use url::Url;

use crate::telemetry::{self};
use crate::telemetry::ops::source::Phase as SourcePhase;

mod db;
pub mod types;

/// kita source add/ls
#[derive(Args)]
pub struct SourceCmd {
    #[command(subcommand)]
    pub cmd: SourceSub,
}

#[derive(Subcommand)]
pub enum SourceSub {
    // add a new listing source (plan-only by default; use --apply to write)
    Add {
        url: String,
        #[arg(long)]
        name: Option<String>,
        /// Federal state the listing covers, e.g. "Hamburg"
        #[arg(long)]
        state: Option<String>,
        #[arg(long, default_value_t = true)]
        active: bool,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    // list sources
    Ls {
        /// Filter by active status: true/false. Omit to show all.
        #[arg(long)]
        active: Option<bool>,
    },
}

pub async fn run(pool: &PgPool, args: SourceCmd) -> Result<()> {
    let log = telemetry::source();
    let _g = log.root_span().entered();
    match args.cmd {
        SourceSub::Add { url, name, state, active, apply } => add_source(pool, url, name, state, active, apply).await?,
        SourceSub::Ls { active } => ls_sources(pool, active).await?,
    }
    Ok(())
}

async fn add_source(
    pool: &PgPool,
    url: String,
    name: Option<String>,
    state: Option<String>,
    active: bool,
    apply: bool,
) -> Result<()> {
    let log = telemetry::source();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("url", url.clone()),
        ("name", format!("{:?}", name)),
        ("active", active.to_string()),
    ]).entered();

    // URL validation (friendly error before DB I/O)
    if Url::parse(&url).is_err() { bail!("Invalid URL: {}", url); }

    if !apply {
        let _s = log.span(&SourcePhase::Plan).entered();
        log.info(format!("📝 Source plan — add url={} name={:?} state={:?} active={}", url, name, state, active));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = types::SourceAddPlan { action: "add", url: url.clone(), name: name.clone(), state: state.clone(), active };
            log.plan(&plan)?;
        }
        return Ok(());
    }
    let _s = log.span(&SourcePhase::Add).entered();
    let inserted = db::upsert_source(pool, &url, name.as_deref(), state.as_deref(), active).await?;
    if inserted { log.info("➕ Source added"); } else { log.info("♻️ Source updated"); }
    if telemetry::config::json_mode() {
        let result = types::SourceAddResult { inserted, url };
        log.result(&result)?;
    }
    Ok(())
}

async fn ls_sources(pool: &PgPool, active: Option<bool>) -> Result<()> {
    let log = telemetry::source();
    let _g = log.root_span_kv([("active", format!("{:?}", active))]).entered();
    let _s = log.span(&SourcePhase::List).entered();
    let sources = db::list_sources(pool, active).await?;
    log.info("📡 Sources:");
    for row in &sources {
        log.info(format!(
            "[{}] {} ({:?}) state={:?} active={} added_at={}",
            row.source_id, row.url, row.name, row.state, row.is_active, row.added_at
        ));
    }
    if telemetry::config::json_mode() {
        let list = types::SourceList { sources };
        log.result(&list)?;
    }
    Ok(())
}
