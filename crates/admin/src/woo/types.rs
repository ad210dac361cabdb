//! Wire types for the store API.
//!
//! Shapes mirror the backend proxy's JSON. Variation `attributes[]` entries
//! carry the term's display name as `option`, not the term id; callers
//! resolve term ids to names through the term cache before building
//! payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use backroom_core::{AttributeId, CategoryId, MediaId, ProductId, StockStatus, TermId, VariationId};

// =============================================================================
// Catalog taxonomy
// =============================================================================

/// A global product attribute (e.g. "Color").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute id, stable across the catalog.
    pub id: AttributeId,
    /// Display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
}

/// A value belonging to one attribute (e.g. "Red" under "Color").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeTerm {
    /// Term id, unique within its attribute.
    pub id: TermId,
    /// Display name; this is what variation payloads carry as `option`.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Parent category id; 0 for top-level categories.
    #[serde(default)]
    pub parent: i64,
}

// =============================================================================
// Products
// =============================================================================

/// Product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Variable,
    /// Anything this workflow does not manage (grouped, external, ...).
    #[serde(other)]
    Other,
}

/// Product publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Publish,
    Pending,
    Private,
}

/// An attribute as attached to a product: all enabled options by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub id: AttributeId,
    pub name: String,
    /// Term display names enabled on this product.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether the attribute is used for variations.
    #[serde(default)]
    pub variation: bool,
    /// Whether the attribute is shown on the product page.
    #[serde(default)]
    pub visible: bool,
}

/// A product image reference as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: MediaId,
    #[serde(default)]
    pub src: String,
}

/// A full product as fetched for edit-mode hydration.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ProductType,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub manage_stock: bool,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub shipping_class: String,
    #[serde(default)]
    pub tax_status: String,
    #[serde(default)]
    pub tax_class: String,
    #[serde(default)]
    pub date_on_sale_from: Option<String>,
    #[serde(default)]
    pub date_on_sale_to: Option<String>,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modified: Option<NaiveDateTime>,
}

// =============================================================================
// Variations
// =============================================================================

/// One attribute choice on a variation.
///
/// `option` is the term's display name; the API does not accept term ids
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAttribute {
    pub id: AttributeId,
    pub name: String,
    pub option: String,
}

/// An image reference sent with payloads (`{"id": ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: MediaId,
}

/// A persisted variation as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub manage_stock: bool,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub image: Option<ProductImage>,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_modified: Option<NaiveDateTime>,
}

// =============================================================================
// Payloads
// =============================================================================

/// A category reference sent with product payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
}

/// Product dimensions, carried as strings like the rest of the measurement
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
}

/// The parent-product payload for create/update.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductType,
    pub status: ProductStatus,
    pub description: String,
    pub short_description: String,
    pub regular_price: String,
    pub sale_price: String,
    pub sku: String,
    pub manage_stock: bool,
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    pub categories: Vec<CategoryRef>,
    pub images: Vec<ImageRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ProductAttribute>,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub weight: String,
    pub dimensions: Dimensions,
    pub shipping_class: String,
    pub tax_status: String,
    pub tax_class: String,
    pub date_on_sale_from: Option<String>,
    pub date_on_sale_to: Option<String>,
}

/// The variation payload for create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationPayload {
    pub attributes: Vec<VariationAttribute>,
    pub regular_price: String,
    pub sale_price: String,
    pub sku: String,
    pub manage_stock: bool,
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

// =============================================================================
// Media
// =============================================================================

/// An uploaded media item.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: MediaId,
    /// Public URL; some proxy deployments name this `url`.
    #[serde(alias = "url", default)]
    pub source_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl Media {
    /// The payload reference (`{"id": ...}`) for this upload.
    #[must_use]
    pub const fn image_ref(&self) -> ImageRef {
        ImageRef { id: self.id }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_wire_spelling() {
        let variable: ProductType = serde_json::from_str("\"variable\"").unwrap();
        assert_eq!(variable, ProductType::Variable);
        let grouped: ProductType = serde_json::from_str("\"grouped\"").unwrap();
        assert_eq!(grouped, ProductType::Other);
    }

    #[test]
    fn test_variation_payload_omits_missing_image() {
        let payload = VariationPayload {
            attributes: vec![],
            regular_price: "10.00".to_string(),
            sale_price: String::new(),
            sku: String::new(),
            manage_stock: false,
            stock_quantity: None,
            stock_status: StockStatus::OutOfStock,
            image: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_variation_deserializes_sparse_body() {
        let json = r#"{"id": 55, "attributes": [{"id": 1, "name": "Color", "option": "Red"}]}"#;
        let variation: Variation = serde_json::from_str(json).unwrap();
        assert_eq!(variation.id, VariationId::new(55));
        assert_eq!(variation.stock_status, StockStatus::InStock);
        assert!(variation.sku.is_empty());
    }

    #[test]
    fn test_media_source_url_alias() {
        let json = r#"{"id": 9, "url": "https://cdn.example.com/a.jpg"}"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.source_url, "https://cdn.example.com/a.jpg");
    }
}
