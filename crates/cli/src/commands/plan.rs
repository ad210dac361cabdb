//! Dry-run combination planning.
//!
//! Builds an attribute selection from `--attr <id>=<term,...>` arguments and
//! prints every variation combination it would generate, with names
//! resolved from the live catalog.

use std::collections::HashMap;

use thiserror::Error;

use backroom_admin::catalog::{AttributeSelection, generate_combinations};
use backroom_core::{AttributeId, TermId};

use super::client_from_env;

/// Errors in the `--attr` argument syntax.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Entry is not of the form `<attribute-id>=<term-id>[,<term-id>...]`.
    #[error("Invalid --attr entry '{0}': expected <attribute-id>=<term-id>[,<term-id>...]")]
    InvalidEntry(String),

    /// Attribute id is unknown to the store.
    #[error("Unknown attribute id {0}")]
    UnknownAttribute(AttributeId),
}

fn parse_entry(entry: &str) -> Result<(AttributeId, Vec<TermId>), PlanError> {
    let (attribute, terms) = entry
        .split_once('=')
        .ok_or_else(|| PlanError::InvalidEntry(entry.to_string()))?;
    let attribute = attribute
        .trim()
        .parse::<i64>()
        .map_err(|_| PlanError::InvalidEntry(entry.to_string()))?;
    let terms = terms
        .split(',')
        .map(|term| {
            term.trim()
                .parse::<i64>()
                .map(TermId::new)
                .map_err(|_| PlanError::InvalidEntry(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if terms.is_empty() {
        return Err(PlanError::InvalidEntry(entry.to_string()));
    }
    Ok((AttributeId::new(attribute), terms))
}

/// Print the combinations an attribute selection would generate.
pub async fn run(entries: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = entries
        .iter()
        .map(|entry| parse_entry(entry))
        .collect::<Result<Vec<_>, _>>()?;

    let client = client_from_env()?;
    let attributes = client.list_attributes().await?;

    // One term fetch per attribute, up front
    let mut term_names: HashMap<AttributeId, HashMap<TermId, String>> = HashMap::new();
    for (attribute, _) in &parsed {
        if !attributes.iter().any(|a| a.id == *attribute) {
            return Err(PlanError::UnknownAttribute(*attribute).into());
        }
        let terms = client.list_attribute_terms(*attribute).await?;
        term_names.insert(
            *attribute,
            terms.into_iter().map(|t| (t.id, t.name)).collect(),
        );
    }

    let mut selection = AttributeSelection::new();
    selection.set_selection(parsed);

    let combinations = generate_combinations(&attributes, &selection);
    tracing::info!("{} combination(s)", combinations.len());

    for combination in &combinations {
        let parts: Vec<String> = combination
            .iter()
            .map(|(attribute_id, term_id)| {
                let name = attributes
                    .iter()
                    .find(|a| a.id == *attribute_id)
                    .map_or_else(|| attribute_id.to_string(), |a| a.name.clone());
                let option = term_names
                    .get(attribute_id)
                    .and_then(|terms| terms.get(term_id).cloned())
                    .unwrap_or_else(|| term_id.to_string());
                format!("{name}={option}")
            })
            .collect();
        tracing::info!("  {}", parts.join(", "));
    }

    Ok(())
}
