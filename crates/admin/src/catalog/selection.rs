//! Attribute and term selection state for the current product draft.

use std::collections::HashMap;

use backroom_core::{AttributeId, TermId};

/// Outcome of toggling an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeToggle {
    /// The attribute became selected; its terms should be loaded.
    Selected,
    /// The attribute became deselected; its term selections were cleared.
    Deselected,
}

/// Single source of truth for which attributes - and which terms of each -
/// are active for the current product draft.
///
/// Invariants:
/// - Deselecting an attribute cascade-clears its term selections.
/// - The term mapping never holds an empty list: deselecting the last term
///   of an attribute removes the attribute's key entirely, so "key absent"
///   is the one representation of "no terms chosen".
///
/// Pure state; the term-loading side effect of selecting an attribute is the
/// caller's job (see [`super::TermCache`]).
#[derive(Debug, Clone, Default)]
pub struct AttributeSelection {
    /// Selected attribute ids, in selection order.
    selected: Vec<AttributeId>,
    /// Selected term ids per attribute, in selection order. Keys exist only
    /// while at least one term is selected.
    terms: HashMap<AttributeId, Vec<TermId>>,
}

impl AttributeSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of an attribute in the selected set.
    ///
    /// Deselection removes the attribute's entry from the term mapping.
    pub fn toggle_attribute(&mut self, attribute: AttributeId) -> AttributeToggle {
        if let Some(pos) = self.selected.iter().position(|id| *id == attribute) {
            self.selected.remove(pos);
            self.terms.remove(&attribute);
            AttributeToggle::Deselected
        } else {
            self.selected.push(attribute);
            AttributeToggle::Selected
        }
    }

    /// Flip membership of a term within an attribute's selection.
    ///
    /// Removing the last term of an attribute prunes the attribute's key.
    pub fn toggle_term(&mut self, attribute: AttributeId, term: TermId) {
        let terms = self.terms.entry(attribute).or_default();
        if let Some(pos) = terms.iter().position(|id| *id == term) {
            terms.remove(pos);
        } else {
            terms.push(term);
        }
        if self.terms.get(&attribute).is_some_and(Vec::is_empty) {
            self.terms.remove(&attribute);
        }
    }

    #[must_use]
    pub fn is_attribute_selected(&self, attribute: AttributeId) -> bool {
        self.selected.contains(&attribute)
    }

    #[must_use]
    pub fn is_term_selected(&self, attribute: AttributeId, term: TermId) -> bool {
        self.terms
            .get(&attribute)
            .is_some_and(|terms| terms.contains(&term))
    }

    /// Selected attribute ids, in selection order.
    #[must_use]
    pub fn selected_attributes(&self) -> &[AttributeId] {
        &self.selected
    }

    /// The selected terms of one attribute; `None` when nothing is chosen.
    #[must_use]
    pub fn selected_terms(&self, attribute: AttributeId) -> Option<&[TermId]> {
        self.terms.get(&attribute).map(Vec::as_slice)
    }

    /// The full attribute-id -> term-ids mapping.
    #[must_use]
    pub const fn term_map(&self) -> &HashMap<AttributeId, Vec<TermId>> {
        &self.terms
    }

    /// True when at least one attribute has at least one term selected.
    #[must_use]
    pub fn has_term_selection(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Replace the whole selection (edit-mode hydration).
    ///
    /// Entries with no terms still mark the attribute selected; their term
    /// key is pruned per the store's invariant.
    pub fn set_selection<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (AttributeId, Vec<TermId>)>,
    {
        self.clear();
        for (attribute, terms) in entries {
            self.selected.push(attribute);
            if !terms.is_empty() {
                self.terms.insert(attribute, terms);
            }
        }
    }

    /// Full wipe, used when switching the product type away from variable
    /// or resetting the form after a successful create.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.terms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR: AttributeId = AttributeId::new(1);
    const SIZE: AttributeId = AttributeId::new(2);
    const RED: TermId = TermId::new(10);
    const BLUE: TermId = TermId::new(11);

    #[test]
    fn test_toggle_attribute_roundtrip() {
        let mut selection = AttributeSelection::new();
        assert_eq!(selection.toggle_attribute(COLOR), AttributeToggle::Selected);
        assert!(selection.is_attribute_selected(COLOR));
        assert_eq!(
            selection.toggle_attribute(COLOR),
            AttributeToggle::Deselected
        );
        assert!(!selection.is_attribute_selected(COLOR));
    }

    #[test]
    fn test_deselect_cascade_clears_terms() {
        let mut selection = AttributeSelection::new();
        selection.toggle_attribute(COLOR);
        selection.toggle_term(COLOR, RED);
        selection.toggle_term(COLOR, BLUE);

        selection.toggle_attribute(COLOR);

        assert!(!selection.is_attribute_selected(COLOR));
        assert!(selection.selected_terms(COLOR).is_none());
        assert!(!selection.is_term_selected(COLOR, RED));
    }

    #[test]
    fn test_last_term_removal_prunes_key() {
        let mut selection = AttributeSelection::new();
        selection.toggle_attribute(COLOR);
        selection.toggle_term(COLOR, RED);
        assert_eq!(selection.selected_terms(COLOR), Some(&[RED][..]));

        selection.toggle_term(COLOR, RED);

        // Key absent, not present-with-empty-list
        assert!(selection.selected_terms(COLOR).is_none());
        assert!(!selection.term_map().contains_key(&COLOR));
        assert!(!selection.has_term_selection());
    }

    #[test]
    fn test_term_order_is_selection_order() {
        let mut selection = AttributeSelection::new();
        selection.toggle_term(COLOR, BLUE);
        selection.toggle_term(COLOR, RED);
        assert_eq!(selection.selected_terms(COLOR), Some(&[BLUE, RED][..]));
    }

    #[test]
    fn test_set_selection_prunes_empty_entries() {
        let mut selection = AttributeSelection::new();
        selection.set_selection(vec![(COLOR, vec![RED]), (SIZE, vec![])]);

        assert!(selection.is_attribute_selected(COLOR));
        assert!(selection.is_attribute_selected(SIZE));
        assert!(selection.selected_terms(SIZE).is_none());
        assert_eq!(selection.selected_attributes(), &[COLOR, SIZE]);
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut selection = AttributeSelection::new();
        selection.toggle_attribute(COLOR);
        selection.toggle_term(COLOR, RED);
        selection.clear();
        assert!(selection.selected_attributes().is_empty());
        assert!(!selection.has_term_selection());
    }
}
