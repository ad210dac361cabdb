//! Payload builders: draft state into store API payloads.

use backroom_core::{StockStatus, normalize_price, normalize_price_or};

use super::staging::VariationDraft;
use crate::form::draft::ProductDraft;
use crate::woo::{
    CategoryRef, ImageRef, ProductAttribute, ProductPayload, ProductStatus, ProductType,
    VariationAttribute, VariationPayload,
};

/// Build the parent-product payload from the draft.
///
/// Variable products carry no parent-level prices (pricing comes from the
/// variations) and never report managed stock without a quantity; the store
/// rejects `manage_stock: true` with a null quantity.
#[must_use]
pub fn build_product_payload(
    draft: &ProductDraft,
    status: ProductStatus,
    attributes: Vec<ProductAttribute>,
) -> ProductPayload {
    let variable = draft.kind == ProductType::Variable;

    let (regular_price, sale_price) = if variable {
        (String::new(), String::new())
    } else {
        (
            normalize_price(&draft.regular_price),
            normalize_price(&draft.sale_price),
        )
    };

    let manage_stock = if variable && draft.stock_quantity.is_none() {
        false
    } else {
        draft.manage_stock
    };
    let stock_quantity = if manage_stock { draft.stock_quantity } else { None };
    let stock_status = if manage_stock {
        StockStatus::from_quantity(draft.stock_quantity)
    } else {
        draft.stock_status
    };

    ProductPayload {
        name: draft.name.trim().to_string(),
        kind: draft.kind,
        status,
        description: draft.description.clone(),
        short_description: draft.short_description.clone(),
        regular_price,
        sale_price,
        sku: draft.sku.trim().to_string(),
        manage_stock,
        stock_quantity,
        stock_status,
        categories: draft
            .categories
            .iter()
            .map(|id| CategoryRef { id: *id })
            .collect(),
        images: draft.images.iter().map(|id| ImageRef { id: *id }).collect(),
        attributes,
        is_virtual: !draft.requires_shipping,
        weight: draft.weight.clone(),
        dimensions: draft.dimensions.clone(),
        shipping_class: draft.shipping_class.clone(),
        tax_status: draft.tax_status.clone(),
        tax_class: draft.tax_class.clone(),
        date_on_sale_from: draft.date_on_sale_from.clone(),
        date_on_sale_to: draft.date_on_sale_to.clone(),
    }
}

/// Build a variation payload from the variation form.
///
/// Prices fall back to the parent's when the variation leaves them empty,
/// and everything is re-emitted in the store's two-decimal string format.
/// Stock is managed exactly when a quantity is present; the status follows
/// the quantity unless the form overrides it.
#[must_use]
pub fn build_variation_payload(
    attributes: Vec<VariationAttribute>,
    draft: &VariationDraft,
    parent: &ProductDraft,
) -> VariationPayload {
    VariationPayload {
        attributes,
        regular_price: normalize_price_or(&draft.regular_price, &parent.regular_price),
        sale_price: normalize_price_or(&draft.sale_price, &parent.sale_price),
        sku: draft.sku.trim().to_string(),
        manage_stock: draft.stock_quantity.is_some(),
        stock_quantity: draft.stock_quantity,
        stock_status: draft
            .stock_status
            .unwrap_or_else(|| StockStatus::from_quantity(draft.stock_quantity)),
        image: draft.image.map(|id| ImageRef { id }),
    }
}
