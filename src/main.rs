use anyhow::{Context, Result};
use clap::Parser;
use countyjoin::{
    fetch::SourceLocation,
    join::load_and_join_with,
    views::{self, SortMode, Tooltip},
    write, Dataset, JoinConfig,
};
use reqwest::Client;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Join county smoking rates with foreign-born population shares"
)]
struct Args {
    /// Smoking-rate CSV (path or http(s) URL)
    #[arg(long, default_value = "data/national_health_data_2024.csv")]
    smoking: String,
    /// Foreign-born CSV (path or http(s) URL)
    #[arg(long, default_value = "data/Updated_People.csv")]
    foreign_born: String,
    /// YAML join configuration; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    parquet: Option<PathBuf>,
    #[arg(long)]
    json: Option<PathBuf>,
    /// State shown in the bar chart summary (defaults to the first state)
    #[arg(long)]
    state: Option<String>,
    #[arg(long, default_value = "alphabetical")]
    sort: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // ─── 2) config + sources ─────────────────────────────────────────
    let cfg = match &args.config {
        Some(path) => JoinConfig::from_yaml_file(path)?,
        None => JoinConfig::default(),
    };
    let smoking: SourceLocation = args.smoking.parse()?;
    let foreign_born: SourceLocation = args.foreign_born.parse()?;

    // ─── 3) load + join ──────────────────────────────────────────────
    let client = Client::new();
    let dataset = Dataset::new(
        load_and_join_with(&client, &smoking, &foreign_born, &cfg)
            .await
            .context("loading sources")?,
    );
    info!(records = dataset.len(), "joined");

    // ─── 4) exports ──────────────────────────────────────────────────
    if let Some(path) = &args.parquet {
        write::write_parquet(&dataset, path)?;
    }
    if let Some(path) = &args.json {
        write::write_json(&dataset, path)?;
    }

    // ─── 5) bar chart summary ────────────────────────────────────────
    let state = match args.state.clone().or_else(|| views::default_state(&dataset)) {
        Some(s) => s,
        None => {
            info!("no records; nothing to summarise");
            return Ok(());
        }
    };
    let sort = SortMode::from_value(&args.sort);
    let chart = views::bar_chart(&dataset, &state, sort);
    println!(
        "{} ({} counties, sorted by {}, y max {:.2})",
        chart.state,
        chart.bars.len(),
        sort.label(),
        chart.y_max
    );
    for r in &chart.bars {
        let [title, smokers, foreign] = Tooltip::new(r).lines();
        println!("  {:<8} {:<40} {:<20} {}", r.county_id, title, smokers, foreign);
    }

    Ok(())
}
