//! Form-level error surface and backend error mapping.

use thiserror::Error;

use crate::catalog::ValidationError;
use crate::woo::WooError;

/// The form field an error should highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    RegularPrice,
    SalePrice,
    Sku,
    StockQuantity,
    Attributes,
    Variations,
}

impl FormField {
    /// The field a client-side validation failure belongs to.
    #[must_use]
    pub const fn for_validation(error: &ValidationError) -> Option<Self> {
        match error {
            ValidationError::MissingName => Some(Self::Name),
            ValidationError::NoAttributeSelected | ValidationError::DuplicateCombination => {
                Some(Self::Attributes)
            }
            ValidationError::MissingRegularPrice => Some(Self::RegularPrice),
            ValidationError::MissingStockQuantity => Some(Self::StockQuantity),
            ValidationError::SkuMatchesParent | ValidationError::SkuInUse => Some(Self::Sku),
            ValidationError::UnknownVariation => Some(Self::Variations),
        }
    }

    /// Map a backend error code to a field.
    ///
    /// Deliberately additive: codes not listed here fall through to the
    /// top-level error surface.
    #[must_use]
    pub fn for_code(code: &str) -> Option<Self> {
        match code {
            "product_invalid_sku" => Some(Self::Sku),
            _ => None,
        }
    }

    /// Map a backend `data.params` key to a field.
    #[must_use]
    pub fn for_param(param: &str) -> Option<Self> {
        match param {
            "name" => Some(Self::Name),
            "regular_price" => Some(Self::RegularPrice),
            "sale_price" => Some(Self::SalePrice),
            "sku" => Some(Self::Sku),
            "stock_quantity" => Some(Self::StockQuantity),
            _ => None,
        }
    }
}

/// Top-level error surface of the product form.
///
/// Validation failures never reached the network; store failures carry the
/// backend's code so field-specific rejections (e.g. a SKU race another
/// editor won) land back on the right field.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] WooError),
}

impl FormError {
    /// The field this error should highlight, when one is identifiable.
    #[must_use]
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::Validation(validation) => FormField::for_validation(validation),
            Self::Store(WooError::Api { code, params, .. }) => FormField::for_code(code)
                .or_else(|| params.keys().find_map(|param| FormField::for_param(param))),
            Self::Store(_) => None,
        }
    }

    /// Render a user-facing message.
    ///
    /// With `verbose` (development) raw error detail is shown; otherwise
    /// generic or pre-mapped text keeps backend internals out of the UI.
    #[must_use]
    pub fn user_message(&self, verbose: bool) -> String {
        match self {
            // Client-side messages are always safe to show
            Self::Validation(validation) => validation.to_string(),
            Self::Store(err) if verbose => err.to_string(),
            Self::Store(WooError::Api { code, .. }) if code == "product_invalid_sku" => {
                "This SKU is already in use. Choose another.".to_string()
            }
            Self::Store(WooError::Api { code, .. })
                if code == "woocommerce_rest_product_invalid_id" =>
            {
                "The product no longer exists.".to_string()
            }
            Self::Store(WooError::RateLimited(_)) => {
                "The store is busy. Try again shortly.".to_string()
            }
            Self::Store(_) => "Saving failed. Check the connection and try again.".to_string(),
        }
    }
}
