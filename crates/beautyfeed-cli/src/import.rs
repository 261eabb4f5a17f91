//! `import` command handler.
//!
//! Reads and parses the whole feed before touching the store, so an unreadable
//! or malformed file fails the command without writing anything. Per-record
//! failures after that point are counted in the summary, not propagated.

use std::path::Path;

use anyhow::Context;
use beautyfeed_import::{ImportSummary, Importer, MemoryStore, PgCatalogStore};

/// Import the feed at `file` (or the configured feed path).
///
/// With `dry_run` the importer runs against an in-memory store, which
/// exercises parsing, normalization and slug generation without a database.
///
/// # Errors
///
/// Returns an error if the feed cannot be read or parsed, or if the database
/// connection or migrations fail.
pub(crate) async fn run_import(
    config: &beautyfeed_core::AppConfig,
    file: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let path = file.unwrap_or(&config.feed_path);

    let xml = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read feed file {}", path.display()))?;
    let catalog = beautyfeed_feed::parse_catalog(&xml)
        .with_context(|| format!("failed to parse feed file {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        categories = catalog.categories.len(),
        offers = catalog.offers.len(),
        "feed parsed"
    );

    let summary = if dry_run {
        Importer::new(MemoryStore::new()).run(&catalog).await
    } else {
        let pool = beautyfeed_db::connect_pool_from_config(config).await?;
        let applied = beautyfeed_db::run_migrations(&pool).await?;
        if applied > 0 {
            tracing::info!(applied, "applied pending migrations");
        }

        let summary = Importer::new(PgCatalogStore::new(pool.clone()))
            .run(&catalog)
            .await;
        pool.close().await;
        summary
    };

    println!("{}", format_summary(&summary, dry_run));
    Ok(())
}

pub(crate) fn format_summary(summary: &ImportSummary, dry_run: bool) -> String {
    let prefix = if dry_run { "dry-run: " } else { "" };
    let categories = &summary.categories;
    let products = &summary.products;

    let mut out = format!(
        "{prefix}imported {} categories ({} linked to a parent), {} products, {} brands",
        categories.upserted, categories.linked, products.imported, summary.brands
    );
    if products.failed > 0 || categories.failed > 0 {
        out.push_str(&format!(
            "; skipped {} products and {} category writes",
            products.failed, categories.failed
        ));
    }
    if categories.deep_nesting > 0 {
        out.push_str(&format!(
            "; {} categories nested deeper than two levels",
            categories.deep_nesting
        ));
    }
    out
}
