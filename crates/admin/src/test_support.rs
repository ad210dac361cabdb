//! In-memory store fake shared by unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use backroom_core::{AttributeId, MediaId, ProductId, VariationId};

use crate::woo::{
    Attribute, AttributeTerm, Media, Product, ProductImage, ProductPayload, ProductStatus,
    StoreApi, Variation, VariationPayload, WooError,
};

/// Mutable fake-store state; tests inspect and reconfigure it freely.
#[derive(Default)]
pub struct FakeState {
    pub attributes: Vec<Attribute>,
    pub terms: HashMap<AttributeId, Vec<AttributeTerm>>,
    pub term_failures: HashMap<AttributeId, bool>,
    pub term_fetches: HashMap<AttributeId, u32>,
    pub product: Option<Product>,
    pub variations: HashMap<ProductId, Vec<Variation>>,
    pub next_product_id: i64,
    pub next_variation_id: i64,
    pub fail_create_product: bool,
    pub fail_update_product: bool,
    pub fail_create_variation: bool,
    pub fail_delete_variation: bool,
    /// Number of `list_variations` calls that fail before the endpoint
    /// recovers (exercises the attachability probe).
    pub list_variation_failures_remaining: u32,
    pub fail_touch: bool,
    pub touch_count: u32,
    pub update_product_count: u32,
    pub deleted_variations: Vec<VariationId>,
}

/// An in-memory `StoreApi` implementation.
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_product_id: 100,
                next_variation_id: 1000,
                ..FakeState::default()
            }),
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn seed_attribute(&self, id: i64, name: &str) {
        self.with_state(|state| {
            state.attributes.push(Attribute {
                id: AttributeId::new(id),
                name: name.to_string(),
                slug: name.to_lowercase(),
            });
        });
    }

    pub fn seed_terms(&self, attribute: AttributeId, terms: &[(i64, &str)]) {
        self.with_state(|state| {
            state.terms.insert(
                attribute,
                terms
                    .iter()
                    .map(|(id, name)| AttributeTerm {
                        id: backroom_core::TermId::new(*id),
                        name: (*name).to_string(),
                        slug: name.to_lowercase(),
                    })
                    .collect(),
            );
        });
    }

    pub fn fail_terms(&self, attribute: AttributeId, fail: bool) {
        self.with_state(|state| {
            state.term_failures.insert(attribute, fail);
        });
    }

    pub fn term_fetch_count(&self, attribute: AttributeId) -> u32 {
        self.with_state(|state| state.term_fetches.get(&attribute).copied().unwrap_or(0))
    }

    pub fn set_product(&self, product: Product) {
        self.with_state(|state| state.product = Some(product));
    }

    pub fn seed_variation(&self, product: ProductId, variation: Variation) {
        self.with_state(|state| {
            state.variations.entry(product).or_default().push(variation);
        });
    }

    pub fn variations(&self, product: ProductId) -> Vec<Variation> {
        self.with_state(|state| state.variations.get(&product).cloned().unwrap_or_default())
    }
}

fn variation_from_payload(id: VariationId, payload: &VariationPayload) -> Variation {
    Variation {
        id,
        attributes: payload.attributes.clone(),
        regular_price: payload.regular_price.clone(),
        sale_price: payload.sale_price.clone(),
        sku: payload.sku.clone(),
        manage_stock: payload.manage_stock,
        stock_quantity: payload.stock_quantity,
        stock_status: payload.stock_status,
        image: payload.image.map(|image| ProductImage {
            id: image.id,
            src: String::new(),
        }),
        date_created: None,
        date_modified: None,
    }
}

impl StoreApi for Arc<FakeStore> {
    async fn list_attributes(&self) -> Result<Vec<Attribute>, WooError> {
        Ok(self.with_state(|state| state.attributes.clone()))
    }

    async fn list_attribute_terms(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<AttributeTerm>, WooError> {
        self.with_state(|state| {
            *state.term_fetches.entry(attribute).or_insert(0) += 1;
            if state.term_failures.get(&attribute).copied().unwrap_or(false) {
                Err(WooError::UnexpectedResponse(
                    "term service unavailable".to_string(),
                ))
            } else {
                Ok(state.terms.get(&attribute).cloned().unwrap_or_default())
            }
        })
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, WooError> {
        self.with_state(|state| {
            state
                .product
                .clone()
                .filter(|product| product.id == id)
                .ok_or_else(|| WooError::NotFound(format!("product {id}")))
        })
    }

    async fn create_product(&self, _payload: &ProductPayload) -> Result<ProductId, WooError> {
        self.with_state(|state| {
            if state.fail_create_product {
                return Err(WooError::UnexpectedResponse(
                    "product create refused".to_string(),
                ));
            }
            let id = ProductId::new(state.next_product_id);
            state.next_product_id += 1;
            state.variations.entry(id).or_default();
            Ok(id)
        })
    }

    async fn update_product(
        &self,
        _id: ProductId,
        _payload: &ProductPayload,
    ) -> Result<(), WooError> {
        self.with_state(|state| {
            if state.fail_update_product {
                return Err(WooError::UnexpectedResponse(
                    "product update refused".to_string(),
                ));
            }
            state.update_product_count += 1;
            Ok(())
        })
    }

    async fn touch_product(&self, _id: ProductId, _status: ProductStatus) -> Result<(), WooError> {
        self.with_state(|state| {
            state.touch_count += 1;
            if state.fail_touch {
                return Err(WooError::UnexpectedResponse("touch refused".to_string()));
            }
            Ok(())
        })
    }

    async fn list_variations(&self, product: ProductId) -> Result<Vec<Variation>, WooError> {
        self.with_state(|state| {
            if state.list_variation_failures_remaining > 0 {
                state.list_variation_failures_remaining -= 1;
                return Err(WooError::NotFound(format!("product {product}")));
            }
            Ok(state.variations.get(&product).cloned().unwrap_or_default())
        })
    }

    async fn create_variation(
        &self,
        product: ProductId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError> {
        self.with_state(|state| {
            if state.fail_create_variation {
                return Err(WooError::Api {
                    code: "product_invalid_sku".to_string(),
                    message: "Invalid or duplicated SKU.".to_string(),
                    status: 400,
                    params: std::collections::BTreeMap::new(),
                });
            }
            let id = VariationId::new(state.next_variation_id);
            state.next_variation_id += 1;
            let variation = variation_from_payload(id, payload);
            state
                .variations
                .entry(product)
                .or_default()
                .push(variation.clone());
            Ok(variation)
        })
    }

    async fn update_variation(
        &self,
        product: ProductId,
        variation: VariationId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError> {
        self.with_state(|state| {
            let list = state
                .variations
                .get_mut(&product)
                .ok_or_else(|| WooError::NotFound(format!("product {product}")))?;
            let entry = list
                .iter_mut()
                .find(|v| v.id == variation)
                .ok_or_else(|| WooError::NotFound(format!("variation {variation}")))?;
            *entry = variation_from_payload(variation, payload);
            Ok(entry.clone())
        })
    }

    async fn delete_variation(
        &self,
        product: ProductId,
        variation: VariationId,
    ) -> Result<(), WooError> {
        self.with_state(|state| {
            if state.fail_delete_variation {
                return Err(WooError::UnexpectedResponse(
                    "variation delete refused".to_string(),
                ));
            }
            if let Some(list) = state.variations.get_mut(&product) {
                list.retain(|v| v.id != variation);
            }
            state.deleted_variations.push(variation);
            Ok(())
        })
    }

    async fn upload_media(
        &self,
        filename: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<Media, WooError> {
        Ok(Media {
            id: MediaId::new(1),
            source_url: format!("https://cdn.example.com/{filename}"),
            title: None,
            filename: Some(filename.to_string()),
        })
    }
}
