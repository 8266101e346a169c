//! CLI entry point for the weekly leaderboard pipeline.
//!
//! Provides subcommands for running the full load-normalize-filter-aggregate
//! pipeline with CSV output (and optional S3 upload), and for printing the
//! leaderboard as JSON for inspection.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use weekly_leaderboard::{
    aggregate::aggregate_weekly_leaders,
    config::JobConfig,
    filter::apply_filter,
    input::load_observations,
    normalize::{MissingValuePolicy, normalize},
    output::{print_json, write_csv_to_s3, write_leaders},
    records::WeeklyLeader,
};

#[derive(Parser)]
#[command(name = "weekly_leaderboard")]
#[command(about = "Computes the weekly metric leader per week bucket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: load, normalize, filter, aggregate, write
    Run {
        /// Input CSV of observation rows
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV for the leaderboard
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only rows whose country starts with this prefix
        #[arg(long)]
        country: Option<String>,

        /// Keep only rows whose os_name starts with this prefix
        #[arg(long)]
        os: Option<String>,

        /// Drop rows with missing required fields instead of failing
        #[arg(long, default_value_t = false)]
        drop_incomplete: bool,

        /// Optional: S3 bucket to upload the leaderboard CSV to
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Optional: gzip compress the CSV before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Aggregate and print the leaderboard as JSON without writing anywhere
    Aggregate {
        /// Input CSV of observation rows
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/weekly_leaderboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("weekly_leaderboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            country,
            os,
            drop_incomplete,
            s3_bucket,
            gzip,
        } => {
            let mut config = JobConfig::from_env();
            if let Some(input) = input {
                config.in_file = input;
            }
            if let Some(output) = output {
                config.out_file = output;
            }
            if country.is_some() {
                config.filter.country = country;
            }
            if os.is_some() {
                config.filter.os_name = os;
            }
            if drop_incomplete {
                config.policy = MissingValuePolicy::DropRow;
            }
            if s3_bucket.is_some() {
                config.s3_bucket = s3_bucket;
            }
            config.gzip = config.gzip || gzip;

            let leaders = compute_leaders(&config)?;
            write_leaders(&config.out_file, &leaders)?;
            info!(
                weeks = leaders.len(),
                out_file = %config.out_file.display(),
                "Leaderboard written"
            );

            if let Some(bucket) = &config.s3_bucket {
                let aws_config = aws_config::load_from_env().await;
                let s3 = aws_sdk_s3::Client::new(&aws_config);
                write_csv_to_s3(&s3, bucket, &config.s3_key, &leaders, config.gzip).await?;
            }
        }
        Commands::Aggregate { input } => {
            let mut config = JobConfig::from_env();
            if let Some(input) = input {
                config.in_file = input;
            }

            let leaders = compute_leaders(&config)?;
            print_json(&leaders)?;
        }
    }

    Ok(())
}

/// Runs the in-memory part of the pipeline: load, normalize, filter, aggregate.
#[tracing::instrument(skip(config), fields(in_file = %config.in_file.display()))]
fn compute_leaders(config: &JobConfig) -> Result<Vec<WeeklyLeader>> {
    let raw = load_observations(&config.in_file)?;
    info!(rows = raw.len(), "Observations loaded");

    let normalized = normalize(raw, config.policy)?;

    let filtered = apply_filter(normalized, &config.filter);
    if !config.filter.is_empty() {
        info!(rows = filtered.len(), "Rows remaining after filter");
    }

    let leaders = aggregate_weekly_leaders(&filtered);
    if leaders.is_empty() {
        warn!("No observations to aggregate; leaderboard is empty");
    }
    Ok(leaders)
}
