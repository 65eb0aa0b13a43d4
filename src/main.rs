//! Expat keyword seeder.
//!
//! Loads each platform's workbook (or the built-in data), upserts the
//! reference tables and generates the keyword combination space.
//!
//! Usage:
//!   cargo run --bin expat-seeder -- --platform sos-expat --fresh
//!   cargo run --bin expat-seeder -- --dry-run

use clap::Parser;
use expat_keyword_seeder::domain::model::Platform;
use expat_keyword_seeder::infra::{config, logging};
use expat_keyword_seeder::{dry_run, format_summary_table, run, PlatformSummary, RunOptions, RunReport, SeedService};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "expat-seeder")]
#[command(about = "Seed platforms, services and keyword combinations for the expat platforms")]
struct Args {
    /// Platform slug or name; repeat for several (default: all)
    #[arg(long = "platform", short = 'p')]
    platforms: Vec<Platform>,

    /// Directory holding `<platform-slug>.xlsx` workbooks
    #[arg(long, env = "SEED_WORKBOOK_DIR")]
    workbook_dir: Option<PathBuf>,

    /// Rows per keyword insert statement
    #[arg(long)]
    batch_size: Option<usize>,

    /// Delete existing keyword combinations of each platform first
    #[arg(long)]
    fresh: bool,

    /// Generate without touching the database
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn into_options(self) -> anyhow::Result<RunOptions> {
        let batch_size = match self.batch_size {
            Some(n) => config::clamp_batch_size(n),
            None => config::keyword_batch_size()?,
        };
        Ok(RunOptions {
            platforms: if self.platforms.is_empty() {
                Platform::ALL.to_vec()
            } else {
                self.platforms
            },
            workbook_dir: self.workbook_dir.unwrap_or_else(config::workbook_dir),
            batch_size,
            fresh: self.fresh,
        })
    }
}

fn print_warnings(report: &RunReport) {
    for run in &report.platforms {
        for warning in &run.warnings {
            println!("  warning: {}", warning);
        }
    }
}

async fn execute(args: Args) -> anyhow::Result<()> {
    let dry = args.dry_run;
    let options = args.into_options()?;
    println!(
        "> Platforms: {}",
        options
            .platforms
            .iter()
            .map(|p| p.slug())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("> Workbooks: {}", options.workbook_dir.display());
    println!("> Batch size: {}", options.batch_size);

    let (report, summary) = if dry {
        let report = dry_run(&options).await?;
        let summary: Vec<PlatformSummary> = report.platforms.iter().map(|run| run.summary()).collect();
        (report, summary)
    } else {
        let service = SeedService::new().await?;
        let report = run(&service, &options).await?;
        let summary = service.summary().await?;
        (report, summary)
    };

    print_warnings(&report);
    tracing::debug!(report = %serde_json::to_string(&report)?, "run report");

    println!();
    println!("{}", format_summary_table(&summary));
    println!();
    println!(
        "> Done in {} ms: {} generated, {} inserted.",
        (report.finished_at - report.started_at).num_milliseconds(),
        report.total_generated(),
        report.total_inserted()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::init();

    if let Err(e) = execute(Args::parse()).await {
        eprintln!("> Seeding failed: {:#}", e);
        std::process::exit(1);
    }
}
