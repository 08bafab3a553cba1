use invsync_core::AppConfig;

/// Length a style-code query must have for the server-side filter;
/// shorter or longer queries list everything.
const STYLE_CODE_QUERY_LEN: usize = 5;

/// List products, with an optional style-code search.
///
/// # Errors
///
/// Returns an error when the listing call fails.
pub(crate) async fn run_products(
    config: &AppConfig,
    style_code: Option<&str>,
) -> anyhow::Result<()> {
    let client = super::build_client(config)?;

    let filter = style_code.filter(|code| code.len() == STYLE_CODE_QUERY_LEN);
    if style_code.is_some() && filter.is_none() {
        tracing::warn!("style-code filter must be 5 characters; listing all products");
    }

    let products = client.list_products(filter).await?;
    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    println!(
        "{:<12} {:<10} {:<10} {:>10}  {:<12}",
        "STYLE CODE", "STYLE ID", "COLOR", "MRP", "RACK SPACE"
    );
    for product in &products {
        println!(
            "{:<12} {:<10} {:<10} {:>10}  {:<12}",
            product.style_code,
            product
                .style_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            product.color.as_deref().unwrap_or("-"),
            product.mrp.map_or_else(|| "-".to_string(), |m| m.to_string()),
            product.rack_space.as_deref().unwrap_or("-"),
        );
    }
    println!("{} products", products.len());

    Ok(())
}

/// List color records, optionally filtered client-side by numeric style code
/// (the filter only applies to queries longer than 4 characters).
///
/// # Errors
///
/// Returns an error when the colors call fails.
pub(crate) async fn run_colors(config: &AppConfig, style_code: Option<&str>) -> anyhow::Result<()> {
    let client = super::build_client(config)?;
    let colors = client.list_colors().await?;

    let filter = style_code
        .filter(|q| q.len() > 4)
        .and_then(|q| q.parse::<i64>().ok());
    let shown: Vec<_> = colors
        .iter()
        .filter(|c| filter.map_or(true, |code| c.style_code == code))
        .collect();

    if shown.is_empty() {
        println!("No colors found");
        return Ok(());
    }
    println!("{:<12} {:<12}", "STYLE CODE", "COLOR");
    for record in shown {
        println!("{:<12} {:<12}", record.style_code, record.color);
    }

    Ok(())
}
