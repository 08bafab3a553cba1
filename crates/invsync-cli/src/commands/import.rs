use std::fs::File;
use std::path::Path;

use invsync_core::AppConfig;
use invsync_import::ImportRun;

/// Run the new-product import pipeline against a catalog CSV.
///
/// Plans (parse + filter against the remote listing), prints the preview,
/// and — unless `dry_run` — uploads the surviving candidates sequentially,
/// reporting `successful/total` at the end.
///
/// # Errors
///
/// Returns an error on CSV parse failure, when the remote listing cannot
/// be fetched, or when nothing survives filtering. Per-row upload failures
/// are counted, not propagated.
pub(crate) async fn run_import(
    config: &AppConfig,
    file: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = super::build_client(config)?;

    let mut run = ImportRun::new();
    let surviving = run.plan(File::open(file)?, &client).await?;

    if surviving == 0 {
        println!("No new products found in CSV");
        return Ok(());
    }
    println!("Found {surviving} valid new products");

    println!("Preview (first {} of {surviving}):", run.preview().len());
    println!("  {:<12} {:<10} {:<28} {:>10}", "STYLE CODE", "COLOR", "STYLE NAME", "MRP");
    for candidate in run.preview() {
        println!(
            "  {:<12} {:<10} {:<28} {:>10}",
            candidate.style_code, candidate.color, candidate.style_name, candidate.mrp
        );
    }

    if dry_run {
        println!("dry-run: would upload {surviving} products");
        return Ok(());
    }

    let outcome = run
        .upload(&client, |pct| tracing::info!(percent = pct, "uploading products"))
        .await?;

    if outcome.failed() > 0 {
        println!(
            "Uploaded {}/{} products ({} failed)",
            outcome.successful,
            outcome.total,
            outcome.failed()
        );
        for error in &outcome.report.errors {
            println!("  Row {}: {}", error.row, error.message);
        }
    } else {
        println!(
            "Successfully uploaded {}/{} products",
            outcome.successful, outcome.total
        );
    }

    Ok(())
}
