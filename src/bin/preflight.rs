use sqlx::postgres::PgPoolOptions;

use expat_keyword_seeder::domain::model::{Platform, TableRegistry};
use expat_keyword_seeder::infra::{config, logging};
use expat_keyword_seeder::ingest::sheets::{
    COUNTRIES_SHEET, KEYWORDS_SHEET, SERVICES_SHEET, SEO_TEMPLATES_SHEET,
};
use expat_keyword_seeder::ingest::{workbook_path, Workbook};

const EXPECTED_SHEETS: [&str; 4] = [COUNTRIES_SHEET, SERVICES_SHEET, KEYWORDS_SHEET, SEO_TEMPLATES_SHEET];

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           SEED_WORKBOOK_DIR, KEYWORD_BATCH_SIZE, DATABASE_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

async fn check_database() -> anyhow::Result<()> {
    let database_url = config::database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to DATABASE_URL: {}", e))?;

    let version: String = sqlx::query_scalar("SELECT version()").fetch_one(&pool).await?;
    println!("  Postgres: {}", version);

    let registry = TableRegistry::keyword_seeding();
    for table in registry.list_tables() {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await?;
        println!(
            "  table {}: {}",
            table,
            if exists { "present" } else { "missing (created on first run)" }
        );
    }
    Ok(())
}

fn check_workbooks() {
    let dir = config::workbook_dir();
    println!("  Workbook dir: {}", dir.display());
    for platform in Platform::ALL {
        let path = workbook_path(&dir, platform.slug());
        match Workbook::open(&path) {
            Ok(workbook) => {
                let names = workbook.sheet_names();
                let (found, missing): (Vec<&str>, Vec<&str>) = EXPECTED_SHEETS
                    .into_iter()
                    .partition(|s| names.iter().any(|n| n.trim().eq_ignore_ascii_case(s)));
                println!(
                    "  {}: {} (sheets: {}; missing: {})",
                    platform,
                    path.display(),
                    if found.is_empty() { "-".to_string() } else { found.join(", ") },
                    if missing.is_empty() { "-".to_string() } else { missing.join(", ") }
                );
            }
            Err(e) => println!("  {}: {} -> built-in defaults", platform, e),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if malformed)
    let batch = config::keyword_batch_size()?;
    let connections = config::max_connections()?;

    println!("> Preflight:");
    println!("  KEYWORD_BATCH_SIZE={}", batch);
    println!("  DATABASE_MAX_CONNECTIONS={}", connections);

    check_workbooks();
    check_database().await?;

    println!("> Preflight OK.");
    Ok(())
}
