//! Stock status and stock-management semantics.

use serde::{Deserialize, Serialize};

/// Stock status of a product or variation.
///
/// Wire spellings match the store API: `instock`, `outofstock`,
/// `onbackorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    /// Status implied by a managed stock quantity.
    ///
    /// Only meaningful when stock is managed; an explicit status override
    /// takes precedence at payload-build time.
    #[must_use]
    pub const fn from_quantity(quantity: Option<i64>) -> Self {
        match quantity {
            Some(q) if q > 0 => Self::InStock,
            _ => Self::OutOfStock,
        }
    }

    /// The wire spelling of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
