//! HTTP plumbing shared by all store API endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::StoreApiConfig;

use super::{ApiErrorBody, WooError};

/// Extended timeout for media uploads; slow backends take minutes to accept
/// large images.
pub(crate) const MEDIA_UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// REST client for the store's backend proxy.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    timeout: Duration,
}

impl WooClient {
    /// Create a new store API client.
    #[must_use]
    pub fn new(config: &StoreApiConfig) -> Self {
        Self {
            inner: Arc::new(WooClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: config.token.expose_secret().to_string(),
                timeout: config.timeout,
            }),
        }
    }

    /// The proxy base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Probe connectivity with a minimal product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy is unreachable or rejects the token.
    pub async fn check_connection(&self) -> Result<(), WooError> {
        let _: Vec<serde_json::Value> = self
            .get("products", &[("per_page", "1".to_string())])
            .await?;
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, WooError> {
        Ok(self.inner.base_url.join(path)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WooError> {
        let request = self
            .inner
            .client
            .get(self.endpoint(path)?)
            .query(query)
            .timeout(self.inner.timeout);
        self.send(request).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, WooError> {
        let request = self
            .inner
            .client
            .request(method, self.endpoint(path)?)
            .json(body)
            .timeout(self.inner.timeout);
        self.send(request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, WooError> {
        // This workflow never uses the trash; deletes are permanent.
        let request = self
            .inner
            .client
            .delete(self.endpoint(path)?)
            .query(&[("force", "true")])
            .timeout(self.inner.timeout);
        self.send(request).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        timeout: Duration,
    ) -> Result<T, WooError> {
        let request = self
            .inner
            .client
            .post(self.endpoint(path)?)
            .multipart(form)
            .timeout(timeout);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, WooError> {
        let response = request.bearer_auth(&self.inner.token).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WooError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(WooError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            // Prefer the store's structured error body when it parses
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                if status == StatusCode::NOT_FOUND {
                    return Err(WooError::NotFound(body.message));
                }
                let (error_status, params) = body.data.map_or_else(
                    || (status.as_u16(), BTreeMap::new()),
                    |data| (data.status.unwrap_or_else(|| status.as_u16()), data.params),
                );
                return Err(WooError::Api {
                    code: body.code,
                    message: body.message,
                    status: error_status,
                    params,
                });
            }

            tracing::error!(
                status = %status,
                body = %truncate(&text, 500),
                "Store API returned non-success status"
            );
            return Err(WooError::UnexpectedResponse(format!(
                "HTTP {status}: {}",
                truncate(&text, 200)
            )));
        }

        serde_json::from_str(&text).map_err(Into::into)
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// Inherent methods take precedence in resolution, so each trait method
// dispatches to the endpoint impl of the same name.
impl super::StoreApi for WooClient {
    async fn list_attributes(&self) -> Result<Vec<super::Attribute>, WooError> {
        Self::list_attributes(self).await
    }

    async fn list_attribute_terms(
        &self,
        attribute: backroom_core::AttributeId,
    ) -> Result<Vec<super::AttributeTerm>, WooError> {
        Self::list_attribute_terms(self, attribute).await
    }

    async fn get_product(
        &self,
        id: backroom_core::ProductId,
    ) -> Result<super::Product, WooError> {
        Self::get_product(self, id).await
    }

    async fn create_product(
        &self,
        payload: &super::ProductPayload,
    ) -> Result<backroom_core::ProductId, WooError> {
        Self::create_product(self, payload).await
    }

    async fn update_product(
        &self,
        id: backroom_core::ProductId,
        payload: &super::ProductPayload,
    ) -> Result<(), WooError> {
        Self::update_product(self, id, payload).await
    }

    async fn touch_product(
        &self,
        id: backroom_core::ProductId,
        status: super::ProductStatus,
    ) -> Result<(), WooError> {
        Self::touch_product(self, id, status).await
    }

    async fn list_variations(
        &self,
        product: backroom_core::ProductId,
    ) -> Result<Vec<super::Variation>, WooError> {
        Self::list_variations(self, product).await
    }

    async fn create_variation(
        &self,
        product: backroom_core::ProductId,
        payload: &super::VariationPayload,
    ) -> Result<super::Variation, WooError> {
        Self::create_variation(self, product, payload).await
    }

    async fn update_variation(
        &self,
        product: backroom_core::ProductId,
        variation: backroom_core::VariationId,
        payload: &super::VariationPayload,
    ) -> Result<super::Variation, WooError> {
        Self::update_variation(self, product, variation, payload).await
    }

    async fn delete_variation(
        &self,
        product: backroom_core::ProductId,
        variation: backroom_core::VariationId,
    ) -> Result<(), WooError> {
        Self::delete_variation(self, product, variation).await
    }

    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<super::Media, WooError> {
        Self::upload_media(self, filename, content_type, bytes).await
    }
}
