//! Product CRUD operations.

use reqwest::Method;
use tracing::instrument;

use backroom_core::ProductId;

use super::{Category, Product, ProductPayload, ProductStatus, WooClient, WooError};

impl WooClient {
    /// Get a product by id (edit-mode hydration).
    ///
    /// # Errors
    ///
    /// Returns `WooError::NotFound` if the product does not exist, or any
    /// transport error.
    #[instrument(skip(self), fields(product = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, WooError> {
        self.get(&format!("products/{id}"), &[]).await
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, WooError> {
        self.get("products/categories", &[("per_page", "100".to_string())])
            .await
    }

    /// Create a product.
    ///
    /// Some proxy deployments return the created product at the top level,
    /// others nest it under `data`; both shapes are accepted.
    ///
    /// # Returns
    ///
    /// The new product's id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, the store rejects the
    /// payload, or the response carries no id.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, WooError> {
        let value: serde_json::Value = self.send_json(Method::POST, "products", payload).await?;

        extract_product_id(&value).ok_or_else(|| {
            WooError::UnexpectedResponse("product create response carried no id".to_string())
        })
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the store rejects the
    /// payload.
    #[instrument(skip(self, payload), fields(product = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), WooError> {
        let _: serde_json::Value = self
            .send_json(Method::PUT, &format!("products/{id}"), payload)
            .await?;
        Ok(())
    }

    /// Re-submit a product's status only.
    ///
    /// The store recomputes parent-level display pricing from the current
    /// variations whenever the product is written, so this empty-handed
    /// update forces a price-range refresh after variation changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %id))]
    pub async fn touch_product(
        &self,
        id: ProductId,
        status: ProductStatus,
    ) -> Result<(), WooError> {
        let body = serde_json::json!({ "status": status });
        let _: serde_json::Value = self
            .send_json(Method::PUT, &format!("products/{id}"), &body)
            .await?;
        Ok(())
    }
}

/// Pull the product id out of a create response, tolerating both the
/// top-level and the `data`-nested envelope.
fn extract_product_id(value: &serde_json::Value) -> Option<ProductId> {
    value
        .get("id")
        .and_then(serde_json::Value::as_i64)
        .or_else(|| {
            value
                .get("data")
                .and_then(|data| data.get("id"))
                .and_then(serde_json::Value::as_i64)
        })
        .map(ProductId::new)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id_top_level() {
        let value = serde_json::json!({"id": 123, "name": "Shirt"});
        assert_eq!(extract_product_id(&value), Some(ProductId::new(123)));
    }

    #[test]
    fn test_extract_id_nested_under_data() {
        let value = serde_json::json!({"data": {"id": 456}});
        assert_eq!(extract_product_id(&value), Some(ProductId::new(456)));
    }

    #[test]
    fn test_extract_id_missing() {
        let value = serde_json::json!({"message": "created"});
        assert_eq!(extract_product_id(&value), None);
    }
}
