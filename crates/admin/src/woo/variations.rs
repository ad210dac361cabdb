//! Variation CRUD operations.

use reqwest::Method;
use tracing::instrument;

use backroom_core::{ProductId, VariationId};

use super::{Variation, VariationPayload, WooClient, WooError};

impl WooClient {
    /// List the persisted variations of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn list_variations(&self, product: ProductId) -> Result<Vec<Variation>, WooError> {
        self.get(
            &format!("products/{product}/variations"),
            &[("per_page", "100".to_string())],
        )
        .await
    }

    /// Create a variation under a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the store rejects the
    /// payload (duplicate SKU, unknown attribute option, ...).
    #[instrument(skip(self, payload), fields(product = %product))]
    pub async fn create_variation(
        &self,
        product: ProductId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError> {
        self.send_json(
            Method::POST,
            &format!("products/{product}/variations"),
            payload,
        )
        .await
    }

    /// Update an existing variation.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the store rejects the
    /// payload.
    #[instrument(skip(self, payload), fields(product = %product, variation = %variation))]
    pub async fn update_variation(
        &self,
        product: ProductId,
        variation: VariationId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError> {
        self.send_json(
            Method::PUT,
            &format!("products/{product}/variations/{variation}"),
            payload,
        )
        .await
    }

    /// Permanently delete a variation.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product, variation = %variation))]
    pub async fn delete_variation(
        &self,
        product: ProductId,
        variation: VariationId,
    ) -> Result<(), WooError> {
        let _: serde_json::Value = self
            .delete(&format!("products/{product}/variations/{variation}"))
            .await?;
        Ok(())
    }
}
