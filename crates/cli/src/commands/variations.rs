//! Variation listing for one product.

use backroom_core::ProductId;

use super::client_from_env;

/// List the persisted variations of a product.
pub async fn run(product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let client = client_from_env()?;
    let product = ProductId::new(product_id);

    let variations = client.list_variations(product).await?;
    tracing::info!("{} variation(s) for product {product}", variations.len());

    for variation in variations {
        let combination = variation
            .attributes
            .iter()
            .map(|attr| format!("{}={}", attr.name, attr.option))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "  [{}] {} | regular {} | sale {} | sku '{}' | {} ({:?} in stock)",
            variation.id,
            combination,
            variation.regular_price,
            variation.sale_price,
            variation.sku,
            variation.stock_status,
            variation.stock_quantity,
        );
    }

    Ok(())
}
