//! Attribute selection, term caching, combination generation, and variation
//! staging for the product editor.
//!
//! These components are the state machine behind variable-product editing:
//! which attributes/terms are active ([`AttributeSelection`]), what the
//! terms of each attribute are ([`TermCache`]), which variation candidates a
//! selection implies ([`generate_combinations`]), and which variations are
//! persisted, staged, or slated for deletion ([`VariationStaging`]).

pub mod builder;
pub mod combinations;
pub mod selection;
pub mod staging;
pub mod terms;

pub use combinations::{Combination, combination_signature, generate_combinations};
pub use selection::{AttributeSelection, AttributeToggle};
pub use staging::{PendingVariation, VariationDraft, VariationStaging};
pub use terms::TermCache;

use thiserror::Error;

/// Client-side validation failures.
///
/// Reported synchronously, block the triggering operation, and never reach
/// the network. Each maps to a form field via
/// [`crate::error::FormField::for_validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Product name is empty.
    #[error("product name is required")]
    MissingName,

    /// No attribute has a term chosen for the variation.
    #[error("select at least one attribute value")]
    NoAttributeSelected,

    /// The variation has no regular price and no parent fallback.
    #[error("regular price is required")]
    MissingRegularPrice,

    /// The variation has no stock quantity.
    #[error("stock quantity is required")]
    MissingStockQuantity,

    /// The variation SKU equals the parent product SKU.
    #[error("variation SKU cannot match the parent product SKU")]
    SkuMatchesParent,

    /// The variation SKU equals another variation's SKU.
    #[error("this SKU is already used by another variation")]
    SkuInUse,

    /// Another variation already covers this attribute combination.
    #[error("a variation with this attribute combination already exists")]
    DuplicateCombination,

    /// Update target is neither staged locally nor known remotely.
    #[error("variation has no remote identity and is not staged")]
    UnknownVariation,
}
