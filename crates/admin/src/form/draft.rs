//! The parent-product draft and its action reducer.

use backroom_core::{CategoryId, MediaId, StockStatus};

use crate::catalog::ValidationError;
use crate::woo::{Dimensions, Product, ProductStatus, ProductType};

/// The parent product being edited.
///
/// Created fresh for the add flow, hydrated from a fetched product for the
/// edit flow, and reset after a successful "create another". All mutation
/// goes through [`ProductDraft::apply`] so every change is a named,
/// auditable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
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
    pub categories: Vec<CategoryId>,
    pub images: Vec<MediaId>,
    pub requires_shipping: bool,
    pub weight: String,
    pub dimensions: Dimensions,
    pub shipping_class: String,
    pub tax_status: String,
    pub tax_class: String,
    pub date_on_sale_from: Option<String>,
    pub date_on_sale_to: Option<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ProductType::Simple,
            status: ProductStatus::Draft,
            description: String::new(),
            short_description: String::new(),
            regular_price: String::new(),
            sale_price: String::new(),
            sku: String::new(),
            manage_stock: true,
            stock_quantity: None,
            stock_status: StockStatus::InStock,
            categories: Vec::new(),
            images: Vec::new(),
            requires_shipping: false,
            weight: String::new(),
            dimensions: Dimensions::default(),
            shipping_class: String::new(),
            tax_status: "taxable".to_string(),
            tax_class: String::new(),
            date_on_sale_from: None,
            date_on_sale_to: None,
        }
    }
}

/// One mutation of the product draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetName(String),
    SetKind(ProductType),
    SetStatus(ProductStatus),
    SetDescription(String),
    SetShortDescription(String),
    SetRegularPrice(String),
    SetSalePrice(String),
    SetSku(String),
    SetManageStock(bool),
    SetStockQuantity(Option<i64>),
    SetStockStatus(StockStatus),
    SetCategories(Vec<CategoryId>),
    AddImage(MediaId),
    RemoveImage(MediaId),
    SetRequiresShipping(bool),
    SetWeight(String),
    SetDimensions(Dimensions),
    SetShippingClass(String),
    SetTaxStatus(String),
    SetTaxClass(String),
    SetSaleSchedule {
        from: Option<String>,
        to: Option<String>,
    },
    /// Back to the empty create-mode draft.
    Reset,
}

impl ProductDraft {
    /// Apply one action to the draft.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::SetName(name) => self.name = name,
            FormAction::SetKind(kind) => self.kind = kind,
            FormAction::SetStatus(status) => self.status = status,
            FormAction::SetDescription(description) => self.description = description,
            FormAction::SetShortDescription(text) => self.short_description = text,
            FormAction::SetRegularPrice(price) => self.regular_price = price,
            FormAction::SetSalePrice(price) => self.sale_price = price,
            FormAction::SetSku(sku) => self.sku = sku,
            FormAction::SetManageStock(manage) => self.manage_stock = manage,
            FormAction::SetStockQuantity(quantity) => self.stock_quantity = quantity,
            FormAction::SetStockStatus(status) => self.stock_status = status,
            FormAction::SetCategories(categories) => self.categories = categories,
            FormAction::AddImage(id) => {
                if !self.images.contains(&id) {
                    self.images.push(id);
                }
            }
            FormAction::RemoveImage(id) => self.images.retain(|image| *image != id),
            FormAction::SetRequiresShipping(requires) => self.requires_shipping = requires,
            FormAction::SetWeight(weight) => self.weight = weight,
            FormAction::SetDimensions(dimensions) => self.dimensions = dimensions,
            FormAction::SetShippingClass(class) => self.shipping_class = class,
            FormAction::SetTaxStatus(status) => self.tax_status = status,
            FormAction::SetTaxClass(class) => self.tax_class = class,
            FormAction::SetSaleSchedule { from, to } => {
                self.date_on_sale_from = from;
                self.date_on_sale_to = to;
            }
            FormAction::Reset => *self = Self::default(),
        }
    }

    /// Build a draft from a fetched product (edit-mode hydration).
    #[must_use]
    pub fn hydrate(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            kind: product.kind,
            status: product.status,
            description: product.description.clone(),
            short_description: product.short_description.clone(),
            regular_price: product.regular_price.clone(),
            sale_price: product.sale_price.clone(),
            sku: product.sku.clone(),
            manage_stock: product.manage_stock,
            stock_quantity: product.stock_quantity,
            stock_status: product.stock_status,
            categories: product.categories.iter().map(|c| c.id).collect(),
            images: product.images.iter().map(|image| image.id).collect(),
            requires_shipping: !product.is_virtual,
            weight: product.weight.clone(),
            dimensions: product.dimensions.clone(),
            shipping_class: product.shipping_class.clone(),
            tax_status: if product.tax_status.is_empty() {
                "taxable".to_string()
            } else {
                product.tax_status.clone()
            },
            tax_class: product.tax_class.clone(),
            date_on_sale_from: product.date_on_sale_from.clone(),
            date_on_sale_to: product.date_on_sale_to.clone(),
        }
    }

    /// Form-level validation gating any save.
    ///
    /// # Errors
    ///
    /// `MissingName` when the product name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_set_field_actions() {
        let mut draft = ProductDraft::default();
        draft.apply(FormAction::SetName("Linen Shirt".to_string()));
        draft.apply(FormAction::SetKind(ProductType::Variable));
        draft.apply(FormAction::SetRegularPrice("49.9".to_string()));

        assert_eq!(draft.name, "Linen Shirt");
        assert_eq!(draft.kind, ProductType::Variable);
        assert_eq!(draft.regular_price, "49.9");
    }

    #[test]
    fn test_add_image_is_idempotent() {
        let mut draft = ProductDraft::default();
        draft.apply(FormAction::AddImage(MediaId::new(7)));
        draft.apply(FormAction::AddImage(MediaId::new(7)));
        assert_eq!(draft.images.len(), 1);

        draft.apply(FormAction::RemoveImage(MediaId::new(7)));
        assert!(draft.images.is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut draft = ProductDraft::default();
        draft.apply(FormAction::SetName("Something".to_string()));
        draft.apply(FormAction::SetStockQuantity(Some(4)));
        draft.apply(FormAction::Reset);
        assert_eq!(draft, ProductDraft::default());
    }

    #[test]
    fn test_validate_requires_name() {
        let mut draft = ProductDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));

        draft.apply(FormAction::SetName("  ".to_string()));
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));

        draft.apply(FormAction::SetName("Shirt".to_string()));
        assert_eq!(draft.validate(), Ok(()));
    }
}
