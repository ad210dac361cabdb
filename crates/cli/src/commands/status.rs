//! Connection probe.

use super::client_from_env;

/// Check that the store API is reachable and the token is accepted.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = client_from_env()?;

    tracing::info!("Probing {}...", client.base_url());
    client.check_connection().await?;
    tracing::info!("Store API reachable, token accepted.");

    Ok(())
}
