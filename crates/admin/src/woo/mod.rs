//! Store API client (WooCommerce behind a backend proxy).
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` against the proxy base URL
//! - The proxy handles store credentials; this client authenticates with a
//!   single bearer token
//! - Typed endpoints per domain: attributes, products, variations, media
//! - The [`StoreApi`] trait is the seam between the editing workflow and the
//!   network, implemented by [`WooClient`] and by in-memory fakes in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use backroom_admin::woo::WooClient;
//!
//! let client = WooClient::new(&config.store);
//!
//! // List attributes and the terms of one of them
//! let attributes = client.list_attributes().await?;
//! let terms = client.list_attribute_terms(attributes[0].id).await?;
//!
//! // Create a variation under a product
//! client.create_variation(product_id, &payload).await?;
//! ```

mod client;
pub mod types;

mod attributes;
mod media;
mod products;
mod variations;

pub use client::WooClient;
pub use types::*;

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use backroom_core::{AttributeId, ProductId, VariationId};

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Rate limited by the proxy or the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store rejected the request with a structured error body.
    #[error("Store API error ({code}): {message}")]
    Api {
        /// Machine-readable error code (e.g. `product_invalid_sku`).
        code: String,
        /// Human-readable message from the backend.
        message: String,
        /// HTTP status the backend reported.
        status: u16,
        /// Field-keyed validation details, when the backend provides them.
        params: BTreeMap<String, serde_json::Value>,
    },

    /// The response did not match any expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Structured error body returned by the store API.
///
/// Shape: `{code, message, data: {status, params?}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub data: Option<ApiErrorData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorData {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// The store operations the editing workflow depends on.
///
/// Implemented by [`WooClient`]; tests drive the workflow against in-memory
/// implementations instead of a live store.
#[allow(async_fn_in_trait)]
pub trait StoreApi {
    /// List all global attributes.
    async fn list_attributes(&self) -> Result<Vec<Attribute>, WooError>;

    /// List the terms of one attribute.
    async fn list_attribute_terms(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<AttributeTerm>, WooError>;

    /// Fetch a product for edit-mode hydration.
    async fn get_product(&self, id: ProductId) -> Result<Product, WooError>;

    /// Create a product, returning its new id.
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, WooError>;

    /// Update an existing product.
    async fn update_product(&self, id: ProductId, payload: &ProductPayload)
    -> Result<(), WooError>;

    /// Re-submit a product's status so the store recomputes derived pricing.
    async fn touch_product(&self, id: ProductId, status: ProductStatus) -> Result<(), WooError>;

    /// List the persisted variations of a product.
    async fn list_variations(&self, product: ProductId) -> Result<Vec<Variation>, WooError>;

    /// Create a variation under a product.
    async fn create_variation(
        &self,
        product: ProductId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError>;

    /// Update an existing variation.
    async fn update_variation(
        &self,
        product: ProductId,
        variation: VariationId,
        payload: &VariationPayload,
    ) -> Result<Variation, WooError>;

    /// Permanently delete a variation.
    async fn delete_variation(
        &self,
        product: ProductId,
        variation: VariationId,
    ) -> Result<(), WooError>;

    /// Upload an image and return its media record.
    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Media, WooError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_woo_error_display() {
        let err = WooError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = WooError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_api_error_display() {
        let err = WooError::Api {
            code: "product_invalid_sku".to_string(),
            message: "Invalid or duplicated SKU.".to_string(),
            status: 400,
            params: BTreeMap::new(),
        };
        assert_eq!(
            err.to_string(),
            "Store API error (product_invalid_sku): Invalid or duplicated SKU."
        );
    }

    #[test]
    fn test_api_error_body_parses_params() {
        let json = r#"{
            "code": "rest_invalid_param",
            "message": "Invalid parameter(s): regular_price",
            "data": {"status": 400, "params": {"regular_price": "regular_price is not of type string."}}
        }"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.code, "rest_invalid_param");
        let data = body.data.unwrap();
        assert_eq!(data.status, Some(400));
        assert!(data.params.contains_key("regular_price"));
    }
}
