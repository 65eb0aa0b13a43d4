//! End-to-end seeding against Postgres.
//!
//! Skipped unless `DATABASE_URL` is set. Uses its own workbook directory
//! (empty, so every platform falls back to the built-in data).

use expat_keyword_seeder::domain::model::Platform;
use expat_keyword_seeder::{run, RunOptions, SeedService};

async fn service() -> Option<SeedService> {
    dotenv::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping database test");
        return None;
    }
    Some(SeedService::new().await.expect("database reachable"))
}

#[tokio::test]
async fn reruns_are_idempotent_and_fresh_regenerates() -> anyhow::Result<()> {
    let Some(service) = service().await else {
        return Ok(());
    };
    let dir = tempfile::tempdir()?;
    let mut options = RunOptions {
        platforms: vec![Platform::UlysseAi],
        workbook_dir: dir.path().to_path_buf(),
        batch_size: 37,
        fresh: true,
    };

    let first = run(&service, &options).await?;
    let platform = &first.platforms[0];
    assert_eq!(platform.generation.generated, platform.expected);
    assert_eq!(platform.generation.inserted, platform.expected);

    // Second pass without --fresh: every row already exists.
    options.fresh = false;
    let second = run(&service, &options).await?;
    assert_eq!(second.platforms[0].generation.generated, platform.expected);
    assert_eq!(second.platforms[0].generation.inserted, 0);

    let summary = service.summary().await?;
    let row = summary
        .iter()
        .find(|s| s.slug == "ulysse-ai")
        .expect("platform row present");
    assert_eq!(row.keywords as u64, platform.expected);
    assert_eq!(row.services as usize, platform.services);

    // Stored SEO templates carry the platform name instead of the token.
    let unbranded: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM seo_templates st JOIN platforms p ON p.id = st.platform_id
         WHERE p.slug = 'ulysse-ai' AND st.title_template LIKE '%{platform}%'",
    )
    .fetch_one(service.pool())
    .await?;
    assert_eq!(unbranded, 0);

    // --fresh clears and regenerates the same space.
    options.fresh = true;
    let third = run(&service, &options).await?;
    assert_eq!(third.platforms[0].cleared, platform.expected);
    assert_eq!(third.platforms[0].generation.inserted, platform.expected);
    Ok(())
}
