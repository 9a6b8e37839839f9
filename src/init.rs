use anyhow::Result;
use clap::Args;
use sqlx::PgPool;

use crate::telemetry::{self};
use crate::telemetry::ops::init::Phase as InitPhase;

/// kita init — apply pending migrations (idempotent)
#[derive(Args)]
pub struct InitCmd {}

pub async fn run(pool: &PgPool, _args: InitCmd) -> Result<()> {
    let log = telemetry::init();
    let _g = log.root_span().entered();
    {
        let _s = log.span(&InitPhase::Migrate).entered();
        sqlx::migrate!().run(pool).await?;
    }
    log.info("Database initialized successfully");
    Ok(())
}
