//! One product editing session: draft, selection, terms, staging, and the
//! handlers the presentation layer calls.

use std::collections::BTreeMap;

use tracing::warn;

use backroom_core::{AttributeId, ProductId, TermId, VariationIdentity};

use crate::catalog::builder::build_variation_payload;
use crate::catalog::combinations::{combination_signature, generate_combinations};
use crate::catalog::staging::VariationDraft;
use crate::catalog::{AttributeSelection, AttributeToggle, TermCache, VariationStaging};
use crate::error::FormError;
use crate::woo::{Attribute, ProductAttribute, ProductType, StoreApi, VariationAttribute};

use super::draft::{FormAction, ProductDraft};

/// Whether the editor creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(ProductId),
}

impl EditorMode {
    /// The remote product id, once one exists.
    #[must_use]
    pub const fn product_id(self) -> Option<ProductId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }
}

/// One product editing session.
///
/// Owns the draft, the attribute/term selection, the term cache, and the
/// variation staging lists; the generic parameter is the store API the
/// session drives. State is owned exclusively by this instance - there is
/// no cross-session sharing, and the remote API resolves concurrent editors
/// last-write-wins.
///
/// Operations that fail store their error on the editor (see
/// [`ProductEditor::last_error`]) and report failure through their return
/// value, leaving all state untouched so nothing is lost on retry.
pub struct ProductEditor<A> {
    pub(crate) api: A,
    pub(crate) mode: EditorMode,
    pub(crate) draft: ProductDraft,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) selection: AttributeSelection,
    pub(crate) terms: TermCache,
    pub(crate) staging: VariationStaging,
    variation_draft: VariationDraft,
    editing: Option<VariationIdentity>,
    loading_attributes: bool,
    loading_variations: bool,
    creating_variation: bool,
    pub(crate) saving: bool,
    pub(crate) last_error: Option<FormError>,
}

impl<A: StoreApi> ProductEditor<A> {
    /// Start an add-product session with an empty draft.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            mode: EditorMode::Create,
            draft: ProductDraft::default(),
            attributes: Vec::new(),
            selection: AttributeSelection::new(),
            terms: TermCache::session(),
            staging: VariationStaging::new(),
            variation_draft: VariationDraft::default(),
            editing: None,
            loading_attributes: false,
            loading_variations: false,
            creating_variation: false,
            saving: false,
            last_error: None,
        }
    }

    /// Start an edit session hydrated from the remote product.
    ///
    /// Loads the product, rebuilds the attribute/term selection from its
    /// attribute options (resolving option names back to term ids through
    /// the term cache), and loads its variations.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be fetched.
    pub async fn for_product(api: A, id: ProductId) -> Result<Self, FormError> {
        let product = api.get_product(id).await?;

        let mut editor = Self::new(api);
        editor.mode = EditorMode::Edit(id);
        editor.draft = ProductDraft::hydrate(&product);

        if editor.draft.kind == ProductType::Variable {
            editor.ensure_attributes_loaded().await;

            let mut entries = Vec::new();
            for attribute in &product.attributes {
                editor.terms.load(&editor.api, attribute.id).await;
                let mut term_ids = Vec::new();
                for option in &attribute.options {
                    if let Some(term) = editor.terms.find_term(attribute.id, option).await {
                        term_ids.push(term);
                    }
                }
                entries.push((attribute.id, term_ids));
            }
            editor.selection.set_selection(entries);
        }

        editor.load_variations().await;
        Ok(editor)
    }

    // =========================================================================
    // State exposed to the presentation layer
    // =========================================================================

    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Apply a form action to the draft.
    ///
    /// Product-type changes should go through
    /// [`ProductEditor::set_product_type`], which also runs the type's side
    /// effects.
    pub fn apply(&mut self, action: FormAction) {
        self.draft.apply(action);
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub const fn selection(&self) -> &AttributeSelection {
        &self.selection
    }

    #[must_use]
    pub const fn terms(&self) -> &TermCache {
        &self.terms
    }

    #[must_use]
    pub const fn staging(&self) -> &VariationStaging {
        &self.staging
    }

    #[must_use]
    pub const fn variation_draft(&self) -> &VariationDraft {
        &self.variation_draft
    }

    pub fn variation_draft_mut(&mut self) -> &mut VariationDraft {
        &mut self.variation_draft
    }

    /// The variation currently being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<VariationIdentity> {
        self.editing
    }

    #[must_use]
    pub const fn is_loading_attributes(&self) -> bool {
        self.loading_attributes
    }

    #[must_use]
    pub const fn is_loading_variations(&self) -> bool {
        self.loading_variations
    }

    #[must_use]
    pub const fn is_creating_variation(&self) -> bool {
        self.creating_variation
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// The last failed operation's error, until the next success or
    /// [`ProductEditor::take_error`].
    #[must_use]
    pub const fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    /// Dismiss and return the current error.
    pub fn take_error(&mut self) -> Option<FormError> {
        self.last_error.take()
    }

    // =========================================================================
    // Attributes and terms
    // =========================================================================

    /// Fetch the global attribute list if not already loaded.
    pub async fn ensure_attributes_loaded(&mut self) -> bool {
        if !self.attributes.is_empty() {
            return true;
        }
        self.loading_attributes = true;
        let result = self.api.list_attributes().await;
        self.loading_attributes = false;
        match result {
            Ok(attributes) => {
                self.attributes = attributes;
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to load attributes");
                self.last_error = Some(err.into());
                false
            }
        }
    }

    /// Flip an attribute's selection; selecting triggers its term load.
    pub async fn toggle_attribute(&mut self, attribute: AttributeId) {
        if self.selection.toggle_attribute(attribute) == AttributeToggle::Selected {
            self.terms.load(&self.api, attribute).await;
        }
    }

    /// Flip a term's membership in an attribute's selection.
    pub fn toggle_attribute_term(&mut self, attribute: AttributeId, term: TermId) {
        self.selection.toggle_term(attribute, term);
    }

    /// Idempotent term fetch for one attribute.
    pub async fn load_attribute_terms(&mut self, attribute: AttributeId) {
        self.terms.load(&self.api, attribute).await;
    }

    /// The recorded term-load failure for one attribute, if any.
    #[must_use]
    pub fn term_load_error(&self, attribute: AttributeId) -> Option<String> {
        self.terms.load_error(attribute)
    }

    /// Re-fetch one attribute's terms after a failure.
    pub async fn retry_attribute_terms(&mut self, attribute: AttributeId) {
        self.terms.retry(&self.api, attribute).await;
    }

    /// Switch the product type, running the type's side effects.
    ///
    /// Leaving `variable` wipes the attribute selection and all variation
    /// state; entering it loads attributes and any persisted variations.
    pub async fn set_product_type(&mut self, kind: ProductType) {
        if self.draft.kind == kind || self.saving {
            return;
        }
        self.draft.apply(FormAction::SetKind(kind));

        match kind {
            ProductType::Variable => {
                self.ensure_attributes_loaded().await;
                self.load_variations().await;
            }
            ProductType::Simple | ProductType::Other => {
                self.staging.clear_variations();
                self.staging.clear_deleted();
                self.selection.clear();
            }
        }
    }

    // =========================================================================
    // Variations
    // =========================================================================

    /// Replace the persisted list with the server's view.
    ///
    /// No-op in add mode, where no parent exists yet. A fetch failure
    /// leaves an empty list; the next save reloads it.
    pub async fn load_variations(&mut self) -> bool {
        let Some(product_id) = self.mode.product_id() else {
            return true;
        };
        self.loading_variations = true;
        let result = self.api.list_variations(product_id).await;
        self.loading_variations = false;
        match result {
            Ok(variations) => {
                self.staging.set_persisted(variations);
                true
            }
            Err(err) => {
                warn!(product = %product_id, error = %err, "Failed to load variations");
                self.staging.set_persisted(Vec::new());
                false
            }
        }
    }

    /// Start a fresh variation form.
    pub fn begin_new_variation(&mut self) {
        self.variation_draft.reset();
        self.editing = None;
    }

    /// Seed the variation form from an existing entry for editing.
    ///
    /// Option names resolve back to term ids through the term cache.
    pub async fn begin_edit_variation(&mut self, identity: VariationIdentity) -> bool {
        let (attributes, regular_price, sale_price, sku, stock_quantity, stock_status, image) =
            match identity {
                VariationIdentity::Local(local_id) => {
                    let Some(pending) = self.staging.pending_by_id(local_id) else {
                        return false;
                    };
                    let p = &pending.payload;
                    (
                        p.attributes.clone(),
                        p.regular_price.clone(),
                        p.sale_price.clone(),
                        p.sku.clone(),
                        p.stock_quantity,
                        Some(p.stock_status),
                        p.image.map(|image| image.id),
                    )
                }
                VariationIdentity::Remote(id) => {
                    let Some(variation) = self.staging.find_persisted(id) else {
                        return false;
                    };
                    (
                        variation.attributes.clone(),
                        variation.regular_price.clone(),
                        variation.sale_price.clone(),
                        variation.sku.clone(),
                        variation.stock_quantity,
                        Some(variation.stock_status),
                        variation.image.as_ref().map(|image| image.id),
                    )
                }
            };

        let mut chosen = BTreeMap::new();
        for attribute in &attributes {
            self.terms.load(&self.api, attribute.id).await;
            if let Some(term) = self.terms.find_term(attribute.id, &attribute.option).await {
                chosen.insert(attribute.id, term);
            }
        }

        self.variation_draft = VariationDraft {
            attributes: chosen,
            regular_price,
            sale_price,
            sku,
            stock_quantity,
            stock_status,
            image,
        };
        self.editing = Some(identity);
        true
    }

    /// Create a variation from the current variation form.
    ///
    /// Validates first; in edit mode the variation is created remotely at
    /// once and the persisted list reloaded, in add mode it is staged
    /// locally with a fresh local identity. Failure leaves every list
    /// untouched.
    pub async fn create_variation(&mut self) -> bool {
        match self.try_create_variation().await {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(err);
                false
            }
        }
    }

    async fn try_create_variation(&mut self) -> Result<(), FormError> {
        let attributes = self
            .resolve_attribute_pairs(&self.variation_draft.attributes)
            .await;
        let payload = build_variation_payload(attributes, &self.variation_draft, &self.draft);
        self.staging.validate(&payload, &self.draft.sku, None)?;

        match self.mode {
            EditorMode::Edit(product_id) => {
                self.creating_variation = true;
                let result = self.api.create_variation(product_id, &payload).await;
                self.creating_variation = false;
                result?;
                self.load_variations().await;
            }
            EditorMode::Create => {
                self.staging.stage(payload);
            }
        }

        self.variation_draft.reset();
        self.editing = None;
        Ok(())
    }

    /// Update the variation being edited from the current variation form.
    ///
    /// A staged variation is edited in place, keeping its local id; a
    /// persisted one is updated remotely and the list reloaded.
    pub async fn update_variation(&mut self) -> bool {
        match self.try_update_variation().await {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(err);
                false
            }
        }
    }

    async fn try_update_variation(&mut self) -> Result<(), FormError> {
        let Some(identity) = self.editing else {
            return Err(crate::catalog::ValidationError::UnknownVariation.into());
        };

        let attributes = self
            .resolve_attribute_pairs(&self.variation_draft.attributes)
            .await;
        let payload = build_variation_payload(attributes, &self.variation_draft, &self.draft);
        self.staging
            .validate(&payload, &self.draft.sku, Some(identity))?;

        match identity {
            VariationIdentity::Local(local_id) => {
                if !self.staging.update_pending(local_id, payload) {
                    return Err(crate::catalog::ValidationError::UnknownVariation.into());
                }
            }
            VariationIdentity::Remote(variation_id) => {
                let Some(product_id) = self.mode.product_id() else {
                    return Err(crate::catalog::ValidationError::UnknownVariation.into());
                };
                self.creating_variation = true;
                let result = self
                    .api
                    .update_variation(product_id, variation_id, &payload)
                    .await;
                self.creating_variation = false;
                result?;
                self.load_variations().await;
            }
        }

        self.variation_draft.reset();
        self.editing = None;
        Ok(())
    }

    /// Remove a variation.
    ///
    /// A staged one disappears immediately; a persisted one is queued for
    /// remote deletion at the next save and hidden from display right away.
    pub fn delete_variation(&mut self, identity: VariationIdentity) {
        match identity {
            VariationIdentity::Local(local_id) => {
                self.staging.remove_pending(local_id);
            }
            VariationIdentity::Remote(id) => {
                self.staging.mark_deleted(id);
            }
        }
    }

    /// Stage a pending variation for every attribute combination the
    /// current selection implies that is not already covered.
    ///
    /// Candidates inherit the parent's prices and stock quantity; returns
    /// how many were added.
    pub async fn generate_variations(&mut self) -> usize {
        let combinations = generate_combinations(&self.attributes, &self.selection);
        let mut added = 0;

        for combination in combinations {
            let attributes = self.resolve_attribute_pairs(&combination).await;
            let signature = combination_signature(&attributes);
            if self.staging.contains_combination(&signature, None) {
                continue;
            }

            let candidate = VariationDraft {
                attributes: combination,
                stock_quantity: self.draft.stock_quantity,
                ..VariationDraft::default()
            };
            let payload = build_variation_payload(attributes, &candidate, &self.draft);
            self.staging.stage(payload);
            added += 1;
        }

        added
    }

    /// Reset the whole session for "create another".
    ///
    /// Keeps the attribute list and term cache; they are session-scoped.
    pub fn reset(&mut self) {
        self.draft.apply(FormAction::Reset);
        self.staging.clear_variations();
        self.staging.clear_deleted();
        self.selection.clear();
        self.variation_draft.reset();
        self.editing = None;
        self.mode = EditorMode::Create;
        self.last_error = None;
    }

    // =========================================================================
    // Resolution helpers
    // =========================================================================

    /// Resolve attribute/term id pairs into the name/option form payloads
    /// carry. Unknown ids resolve to empty strings rather than dropping the
    /// pair.
    pub(crate) async fn resolve_attribute_pairs(
        &self,
        pairs: &BTreeMap<AttributeId, TermId>,
    ) -> Vec<VariationAttribute> {
        let mut resolved = Vec::with_capacity(pairs.len());
        for (attribute, term) in pairs {
            let name = self
                .attributes
                .iter()
                .find(|a| a.id == *attribute)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            let option = self
                .terms
                .term_name(*attribute, *term)
                .await
                .unwrap_or_default();
            resolved.push(VariationAttribute {
                id: *attribute,
                name,
                option,
            });
        }
        resolved
    }

    /// Build the parent payload's attribute entries from the selection,
    /// with options as term display names.
    pub(crate) async fn product_attributes_payload(&self) -> Vec<ProductAttribute> {
        let variation = self.draft.kind == ProductType::Variable;
        let mut result = Vec::new();
        for attribute in &self.attributes {
            let Some(terms) = self.selection.selected_terms(attribute.id) else {
                continue;
            };
            let mut options = Vec::new();
            for term in terms {
                if let Some(name) = self.terms.term_name(attribute.id, *term).await {
                    options.push(name);
                }
            }
            if options.is_empty() {
                continue;
            }
            result.push(ProductAttribute {
                id: attribute.id,
                name: attribute.name.clone(),
                options,
                variation,
                visible: true,
            });
        }
        result
    }
}
