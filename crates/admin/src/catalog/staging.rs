//! The variation staging store: persisted, pending, and deleted lists.
//!
//! One instance belongs to one product edit session. `persisted` mirrors the
//! server, `pending` holds locally staged variations that have never reached
//! the server, and `deleted` queues remote ids whose delete call is deferred
//! to the next save. Validation runs before any mutation so a rejected
//! operation leaves every list untouched.

use std::collections::BTreeMap;

use uuid::Uuid;

use backroom_core::{AttributeId, MediaId, StockStatus, TermId, VariationId, VariationIdentity};

use super::ValidationError;
use super::combinations::combination_signature;
use crate::woo::{Variation, VariationPayload};

/// Form state for the variation being created or edited.
#[derive(Debug, Clone, Default)]
pub struct VariationDraft {
    /// Chosen term per attribute.
    pub attributes: BTreeMap<AttributeId, TermId>,
    pub regular_price: String,
    pub sale_price: String,
    pub sku: String,
    pub stock_quantity: Option<i64>,
    /// Explicit stock-status override; derived from the quantity when
    /// absent.
    pub stock_status: Option<StockStatus>,
    /// Uploaded image to attach.
    pub image: Option<MediaId>,
}

impl VariationDraft {
    /// Choose a term for an attribute (one term per attribute).
    pub fn set_term(&mut self, attribute: AttributeId, term: TermId) {
        self.attributes.insert(attribute, term);
    }

    /// Remove an attribute's choice.
    pub fn clear_term(&mut self, attribute: AttributeId) {
        self.attributes.remove(&attribute);
    }

    /// Back to the empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A variation staged locally, not yet known to the server.
#[derive(Debug, Clone)]
pub struct PendingVariation {
    /// Local identity; becomes irrelevant once the server assigns an id.
    pub local_id: Uuid,
    /// The create payload this entry will translate into at save time.
    pub payload: VariationPayload,
}

/// The three variation lists of one product edit session.
#[derive(Debug, Default)]
pub struct VariationStaging {
    persisted: Vec<Variation>,
    pending: Vec<PendingVariation>,
    deleted: Vec<VariationId>,
}

impl VariationStaging {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Variations the server currently knows, minus optimistic deletions.
    #[must_use]
    pub fn persisted(&self) -> &[Variation] {
        &self.persisted
    }

    /// Locally staged variations awaiting the next save.
    #[must_use]
    pub fn pending(&self) -> &[PendingVariation] {
        &self.pending
    }

    /// Remote ids slated for deletion on the next save.
    #[must_use]
    pub fn deleted(&self) -> &[VariationId] {
        &self.deleted
    }

    /// Replace the persisted list wholesale with the server's current view.
    pub fn set_persisted(&mut self, variations: Vec<Variation>) {
        self.persisted = variations;
    }

    /// Stage a new local variation; returns its local id.
    pub fn stage(&mut self, payload: VariationPayload) -> Uuid {
        let local_id = Uuid::new_v4();
        self.pending.push(PendingVariation { local_id, payload });
        local_id
    }

    /// Replace a staged variation's payload in place, keeping its local id.
    pub fn update_pending(&mut self, local_id: Uuid, payload: VariationPayload) -> bool {
        match self.pending.iter_mut().find(|p| p.local_id == local_id) {
            Some(entry) => {
                entry.payload = payload;
                true
            }
            None => false,
        }
    }

    /// Drop a staged variation before it ever reaches the server.
    pub fn remove_pending(&mut self, local_id: Uuid) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.local_id != local_id);
        self.pending.len() < before
    }

    /// Queue a remote variation for deletion and remove it from display.
    ///
    /// The actual delete call is deferred to the next save.
    pub fn mark_deleted(&mut self, id: VariationId) {
        self.deleted.push(id);
        self.persisted.retain(|v| v.id != id);
    }

    #[must_use]
    pub fn pending_by_id(&self, local_id: Uuid) -> Option<&PendingVariation> {
        self.pending.iter().find(|p| p.local_id == local_id)
    }

    #[must_use]
    pub fn find_persisted(&self, id: VariationId) -> Option<&Variation> {
        self.persisted.iter().find(|v| v.id == id)
    }

    /// Drain the pending queue (after a successful save).
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Drain the deleted queue (after a successful save).
    pub fn clear_deleted(&mut self) {
        self.deleted.clear();
    }

    /// Wipe the persisted and pending lists (full form reset).
    pub fn clear_variations(&mut self) {
        self.persisted.clear();
        self.pending.clear();
    }

    /// True when some persisted or pending variation covers the same
    /// normalized attribute combination.
    #[must_use]
    pub fn contains_combination(
        &self,
        signature: &str,
        exclude: Option<VariationIdentity>,
    ) -> bool {
        let persisted_hit = self.persisted.iter().any(|v| {
            exclude != Some(VariationIdentity::Remote(v.id))
                && combination_signature(&v.attributes) == signature
        });
        persisted_hit
            || self.pending.iter().any(|p| {
                exclude != Some(VariationIdentity::Local(p.local_id))
                    && combination_signature(&p.payload.attributes) == signature
            })
    }

    /// True when some other variation already uses this trimmed SKU.
    #[must_use]
    pub fn sku_taken(&self, sku: &str, exclude: Option<VariationIdentity>) -> bool {
        let sku = sku.trim();
        if sku.is_empty() {
            return false;
        }
        let persisted_hit = self.persisted.iter().any(|v| {
            exclude != Some(VariationIdentity::Remote(v.id)) && v.sku.trim() == sku
        });
        persisted_hit
            || self.pending.iter().any(|p| {
                exclude != Some(VariationIdentity::Local(p.local_id))
                    && p.payload.sku.trim() == sku
            })
    }

    /// Validate a variation payload against this session's state.
    ///
    /// `editing` identifies the variation being updated so it does not
    /// collide with itself. Runs before any mutation or network call; a
    /// rejected payload changes nothing.
    ///
    /// The server may still reject on its own stricter rules (e.g. a SKU
    /// race with another editor); those surface as save-time errors.
    ///
    /// # Errors
    ///
    /// The first failed check, in field order.
    pub fn validate(
        &self,
        payload: &VariationPayload,
        parent_sku: &str,
        editing: Option<VariationIdentity>,
    ) -> Result<(), ValidationError> {
        if payload.attributes.is_empty() {
            return Err(ValidationError::NoAttributeSelected);
        }
        if payload.regular_price.trim().is_empty() {
            return Err(ValidationError::MissingRegularPrice);
        }
        if payload.stock_quantity.is_none() {
            return Err(ValidationError::MissingStockQuantity);
        }

        let sku = payload.sku.trim();
        if !sku.is_empty() {
            let parent = parent_sku.trim();
            if !parent.is_empty() && sku == parent {
                return Err(ValidationError::SkuMatchesParent);
            }
            if self.sku_taken(sku, editing) {
                return Err(ValidationError::SkuInUse);
            }
        }

        let signature = combination_signature(&payload.attributes);
        if self.contains_combination(&signature, editing) {
            return Err(ValidationError::DuplicateCombination);
        }

        Ok(())
    }
}
