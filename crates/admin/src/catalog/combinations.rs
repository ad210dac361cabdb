//! Cartesian combination generation for variation candidates.

use std::collections::BTreeMap;

use backroom_core::{AttributeId, TermId};

use super::selection::AttributeSelection;
use crate::woo::{Attribute, VariationAttribute};

/// One cell of the cartesian product: a single chosen term per attribute.
pub type Combination = BTreeMap<AttributeId, TermId>;

/// All attribute-term combinations implied by the current selection.
///
/// Only attributes with at least one selected term participate; an
/// attribute with no selected terms is excluded from the product entirely,
/// not treated as "any value". The product is built by iterative
/// flat-mapping, so the result holds `∏ |terms_i|` combinations, in
/// attribute-list x term-selection order. Returns an empty list when no
/// attribute qualifies.
///
/// Duplicate detection against existing variations is the caller's job (see
/// [`super::VariationStaging`]).
#[must_use]
pub fn generate_combinations(
    attributes: &[Attribute],
    selection: &AttributeSelection,
) -> Vec<Combination> {
    let active: Vec<(AttributeId, &[TermId])> = attributes
        .iter()
        .filter_map(|attr| {
            selection
                .selected_terms(attr.id)
                .map(|terms| (attr.id, terms))
        })
        .collect();

    if active.is_empty() {
        return Vec::new();
    }

    let mut combinations = vec![Combination::new()];
    for (attribute, terms) in active {
        combinations = combinations
            .into_iter()
            .flat_map(|combination| {
                terms.iter().map(move |term| {
                    let mut next = combination.clone();
                    next.insert(attribute, *term);
                    next
                })
            })
            .collect();
    }
    combinations
}

/// Order-independent signature of a variation's attribute combination.
///
/// Two variations cover the same combination exactly when their signatures
/// are equal, regardless of attribute order. Options are compared trimmed.
#[must_use]
pub fn combination_signature(attributes: &[VariationAttribute]) -> String {
    let mut parts: Vec<String> = attributes
        .iter()
        .map(|attr| format!("{}:{}", attr.id, attr.option.trim()))
        .collect();
    parts.sort();
    parts.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(id: i64, name: &str) -> Attribute {
        Attribute {
            id: AttributeId::new(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    fn selection_of(entries: &[(i64, &[i64])]) -> AttributeSelection {
        let mut selection = AttributeSelection::new();
        selection.set_selection(entries.iter().map(|(attr, terms)| {
            (
                AttributeId::new(*attr),
                terms.iter().map(|t| TermId::new(*t)).collect(),
            )
        }));
        selection
    }

    #[test]
    fn test_count_is_product_of_term_counts() {
        let attributes = vec![attribute(1, "Color"), attribute(2, "Size"), attribute(3, "Fit")];
        let selection = selection_of(&[(1, &[10, 11, 12]), (2, &[20, 21]), (3, &[30, 31])]);

        let combos = generate_combinations(&attributes, &selection);
        assert_eq!(combos.len(), 3 * 2 * 2);
    }

    #[test]
    fn test_two_colors_one_size() {
        // Red/Blue x Medium
        let attributes = vec![attribute(1, "Color"), attribute(2, "Size")];
        let selection = selection_of(&[(1, &[10, 11]), (2, &[20])]);

        let combos = generate_combinations(&attributes, &selection);

        let expected: Vec<Combination> = vec![
            [(AttributeId::new(1), TermId::new(10)), (AttributeId::new(2), TermId::new(20))]
                .into_iter()
                .collect(),
            [(AttributeId::new(1), TermId::new(11)), (AttributeId::new(2), TermId::new(20))]
                .into_iter()
                .collect(),
        ];
        assert_eq!(combos, expected);
    }

    #[test]
    fn test_no_qualifying_attributes_yields_empty() {
        let attributes = vec![attribute(1, "Color")];
        let selection = AttributeSelection::new();
        assert!(generate_combinations(&attributes, &selection).is_empty());
    }

    #[test]
    fn test_attribute_without_terms_is_excluded() {
        let mut selection = selection_of(&[(1, &[10])]);
        // Size is selected but has no terms; it must not contribute branches
        selection.toggle_attribute(AttributeId::new(2));

        let attributes = vec![attribute(1, "Color"), attribute(2, "Size")];
        let combos = generate_combinations(&attributes, &selection);

        assert_eq!(combos.len(), 1);
        assert!(!combos[0].contains_key(&AttributeId::new(2)));
    }

    #[test]
    fn test_signature_is_order_independent() {
        let forward = vec![
            VariationAttribute {
                id: AttributeId::new(1),
                name: "Color".to_string(),
                option: "Red".to_string(),
            },
            VariationAttribute {
                id: AttributeId::new(2),
                name: "Size".to_string(),
                option: "Medium".to_string(),
            },
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(
            combination_signature(&forward),
            combination_signature(&reversed)
        );
    }

    #[test]
    fn test_signature_trims_options() {
        let padded = vec![VariationAttribute {
            id: AttributeId::new(1),
            name: "Color".to_string(),
            option: " Red ".to_string(),
        }];
        let plain = vec![VariationAttribute {
            id: AttributeId::new(1),
            name: "Color".to_string(),
            option: "Red".to_string(),
        }];
        assert_eq!(combination_signature(&padded), combination_signature(&plain));
    }
}
