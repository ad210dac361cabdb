//! Attribute and term listing.

use super::client_from_env;

/// List all global attributes, optionally with their terms.
pub async fn run(with_terms: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = client_from_env()?;

    let attributes = client.list_attributes().await?;
    tracing::info!("{} attribute(s)", attributes.len());

    for attribute in attributes {
        tracing::info!("  [{}] {}", attribute.id, attribute.name);
        if !with_terms {
            continue;
        }
        match client.list_attribute_terms(attribute.id).await {
            Ok(terms) => {
                for term in terms {
                    tracing::info!("      [{}] {} ({})", term.id, term.name, term.slug);
                }
            }
            Err(e) => {
                // One attribute's failure should not kill the listing
                tracing::warn!("      terms unavailable: {e}");
            }
        }
    }

    Ok(())
}
