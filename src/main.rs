use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use veritas_rs::config::Settings;
use veritas_rs::render::{present, render_history, EXAMPLE_CLAIMS};
use veritas_rs::server::{run_server, Engine};
use veritas_rs::types::is_blank_claim;
use veritas_rs::*;

#[derive(Parser)]
#[command(name = "veritas", version, about = "Fact-check a claim with a search-grounded model")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Directory holding the check history
    #[arg(long, global = true, env = "VERITAS_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, global = true, env = "VERITAS_MODEL", default_value = llm::gemini::DEFAULT_MODEL)]
    model: String,
    /// Override the generativelanguage API root
    #[arg(long, global = true, env = "VERITAS_BASE_URL")]
    base_url: Option<String>,
    #[arg(long, global = true, default_value_t = 30_000)]
    timeout_ms: u64,
    /// Outbound request rate limit
    #[arg(long, global = true, default_value_t = 2)]
    qps: u32,
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Check a single claim and record it
    Check {
        claim: String,
        /// Print only the verdict and explanation, as copied to a clipboard
        #[arg(long)]
        copy: bool,
    },
    /// List past checks, most recent first
    History { #[arg(long)] json: bool },
    /// Show a past result by its history index
    Show {
        index: usize,
        #[arg(long)]
        copy: bool,
    },
    ClearHistory,
    /// Print example claims
    Examples,
    /// Serve the HTTP API
    Serve { #[arg(long, default_value = "127.0.0.1:8787")] addr: String },
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout_ms,
            qps: self.qps,
            data_dir: self.data_dir.clone(),
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn checker(settings: &Settings) -> Result<FactCheckClient> {
    Ok(FactCheckClient::new(Arc::new(settings.gemini_client()?)))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(if matches!(cli.cmd, Cmd::Serve { .. }) { "info" } else { "warn" });

    let settings = cli.settings();
    let color = !cli.no_color;

    match &cli.cmd {
        Cmd::Check { claim, copy } => {
            if is_blank_claim(claim) {
                bail!("claim must not be empty");
            }
            let checker = checker(&settings)?;
            let mut history = HistoryStore::load(settings.storage()?);
            let result = match checker.check(claim).await {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            print!("{}", present(claim, &result, *copy, color));
            if let Err(e) = history.add(HistoryEntry::new(claim.clone(), result)) {
                tracing::error!(error = %e, "failed to persist history");
            }
        }
        Cmd::History { json } => {
            let history = HistoryStore::load(settings.storage()?);
            if *json {
                println!("{}", serde_json::to_string_pretty(history.list())?);
            } else {
                print!("{}", render_history(history.list(), color));
            }
        }
        Cmd::Show { index, copy } => {
            let history = HistoryStore::load(settings.storage()?);
            let entry = history
                .get(*index)
                .with_context(|| format!("no history entry at index {index} ({} stored)", history.len()))?;
            print!("{}", present(&entry.original_claim, &entry.result, *copy, color));
        }
        Cmd::ClearHistory => {
            let mut history = HistoryStore::load(settings.storage()?);
            history.clear()?;
            println!("History cleared.");
        }
        Cmd::Examples => {
            for claim in EXAMPLE_CLAIMS {
                println!("{claim}");
            }
        }
        Cmd::Serve { addr } => {
            let engine = Engine::new(checker(&settings)?, HistoryStore::load(settings.storage()?));
            run_server(engine, addr).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
