//! Media upload operations.

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::client::MEDIA_UPLOAD_TIMEOUT;
use super::{Media, WooClient, WooError};

impl WooClient {
    /// Upload an image for later attachment to a product or variation.
    ///
    /// Uses an extended timeout; image processing on the backend can take
    /// minutes for large files.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the response cannot be
    /// parsed.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Media, WooError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        self.post_multipart("media", form, MEDIA_UPLOAD_TIMEOUT)
            .await
    }
}
