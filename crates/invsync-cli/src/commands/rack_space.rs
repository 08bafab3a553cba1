use std::fs::File;
use std::path::Path;

use invsync_core::AppConfig;
use invsync_import::{build_product_map, UpdateRun};

/// Run the rack-space update pipeline against a stock CSV.
///
/// Plans (parse + stock/dedup filtering), prints the preview, and — unless
/// `dry_run` — fetches the full product listing once, re-reads the whole
/// file, and issues batched updates. The execute pass covers every parsed
/// row, so rows the preview filtered out show up as row errors in the
/// summary.
///
/// # Errors
///
/// Returns an error on CSV parse failure, when the product listing cannot
/// be fetched, or when the preview survives nothing. Per-row update
/// failures are counted, not propagated.
pub(crate) async fn run_rack_space(
    config: &AppConfig,
    file: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = super::build_client(config)?;

    let mut run = UpdateRun::new();
    let surviving = run.plan(File::open(file)?)?;

    if surviving == 0 {
        println!("No updatable rows found in CSV");
        return Ok(());
    }

    println!("Preview (first {} of {surviving}):", run.preview().len());
    println!("  {:<14} {:<14} {:>8}", "SKU PREFIX", "RACK SPACE", "IN STOCK");
    for candidate in run.preview() {
        println!(
            "  {:<14} {:<14} {:>8}",
            candidate.sku_prefix, candidate.rack_space, candidate.in_stock
        );
    }

    if dry_run {
        println!("dry-run: would update rack space for {surviving} SKUs");
        return Ok(());
    }

    let products = build_product_map(client.list_products(None).await?);
    tracing::info!(products = products.len(), "product map built");

    let report = run
        .execute(
            File::open(file)?,
            &client,
            &products,
            config.batch_size,
            |pct| tracing::info!(percent = pct, "updating rack space"),
        )
        .await?;

    if report.success_count > 0 {
        println!("Successfully updated {} products", report.success_count);
    }
    if report.error_count > 0 {
        println!("Failed to update {} products", report.error_count);
        for error in &report.errors {
            println!("  Row {}: {}", error.row, error.message);
        }
    }

    Ok(())
}
