use clap::{Parser, Subcommand};
use sqlx::PgPool;
use anyhow::Result;
use dotenvy::dotenv;
use std::env;

mod init;
mod source;
mod import;
mod extract;
mod joblog;
mod jobs;
mod util;
mod telemetry;

#[derive(Parser)]
#[command(name = "kita", about = "Kita directory import CLI")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Init(init::InitCmd),
    Source(source::SourceCmd),
    Import(import::ImportCmd),
    Jobs(jobs::JobsCmd),
    Logs(jobs::LogsCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and KITA_LOG_FORMAT
    telemetry::config::init_tracing();
    let dsn = cli
        .dsn
        .or_else(|| env::var("DATABASE_URL").ok())
        .expect("Please provide --dsn or set DATABASE_URL in .env");

    let pool = PgPool::connect(&dsn).await?;

    match cli.command {
        Commands::Init(args) => init::run(&pool, args).await?,
        Commands::Source(args) => source::run(&pool, args).await?,
        Commands::Import(args) => import::run(&pool, args).await?,
        Commands::Jobs(args) => jobs::run_jobs(&pool, args).await?,
        Commands::Logs(args) => jobs::run_logs(&pool, args).await?,
    }

    Ok(())
}
