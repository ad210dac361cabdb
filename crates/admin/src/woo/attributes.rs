//! Attribute and term operations.

use tracing::instrument;

use backroom_core::AttributeId;

use super::{Attribute, AttributeTerm, WooClient, WooError};

impl WooClient {
    /// List all global attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_attributes(&self) -> Result<Vec<Attribute>, WooError> {
        self.get("products/attributes", &[("per_page", "100".to_string())])
            .await
    }

    /// List the terms of one attribute.
    ///
    /// Terms rarely change; callers cache the result for the session (see
    /// `catalog::terms::TermCache`).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(attribute = %attribute))]
    pub async fn list_attribute_terms(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<AttributeTerm>, WooError> {
        self.get(
            &format!("products/attributes/{attribute}/terms"),
            &[("per_page", "100".to_string())],
        )
        .await
    }
}
