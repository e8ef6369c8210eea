use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};

mod aggregate;
mod collapse;
mod models;
mod normalize;
mod report;
mod source;

#[derive(Parser)]
#[command(name = "volunteer-intake-dashboard")]
#[command(about = "Reporting dashboard over volunteer registration records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a one-shot summary of the latest records
    #[command(group(
        ArgGroup::new("records")
            .args(["url", "csv"])
            .multiple(false)
    ))]
    Summary {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = 6)]
        top: usize,
        #[arg(long, default_value_t = 3.0)]
        min_share: f64,
        /// Emit the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("records")
            .args(["url", "csv"])
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = 6)]
        top: usize,
        #[arg(long, default_value_t = 3.0)]
        min_share: f64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Refetch and reprint the summary on a fixed interval
    #[command(group(
        ArgGroup::new("records")
            .args(["url", "csv"])
            .multiple(false)
    ))]
    Watch {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = 6)]
        top: usize,
        #[arg(long, default_value_t = 3.0)]
        min_share: f64,
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },
}

async fn load_records(
    url: Option<&str>,
    csv: Option<&PathBuf>,
) -> anyhow::Result<Vec<models::RawRecord>> {
    if let Some(path) = csv {
        source::load_csv(path)
    } else {
        let client = source::SheetClient::new(url.unwrap_or(source::DEFAULT_SHEET_URL));
        client.fetch_records().await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            url,
            csv,
            top,
            min_share,
            json,
        } => {
            let records = load_records(url.as_deref(), csv.as_ref()).await?;
            let summary = aggregate::summarize(&records, Utc::now(), top, min_share);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_summary(&summary));
            }
        }
        Commands::Report {
            url,
            csv,
            top,
            min_share,
            out,
        } => {
            let records = load_records(url.as_deref(), csv.as_ref()).await?;
            let summary = aggregate::summarize(&records, Utc::now(), top, min_share);
            std::fs::write(&out, report::build_report(&summary))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Watch {
            url,
            csv,
            top,
            min_share,
            interval,
        } => {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));

            // A failed refresh only costs that tick's update; the loop keeps
            // going and the previous output stands.
            loop {
                ticker.tick().await;
                match load_records(url.as_deref(), csv.as_ref()).await {
                    Ok(records) => {
                        let summary = aggregate::summarize(&records, Utc::now(), top, min_share);
                        println!("--- refreshed {} ---", Utc::now().format("%Y-%m-%d %H:%M:%S"));
                        print!("{}", report::render_summary(&summary));
                    }
                    Err(err) => log::error!("refresh failed: {err:#}"),
                }
            }
        }
    }

    Ok(())
}
