//! CLI subcommands.

pub mod attributes;
pub mod plan;
pub mod status;
pub mod variations;

use backroom_admin::config::AdminConfig;
use backroom_admin::woo::WooClient;

/// Build a store client from the environment.
pub(crate) fn client_from_env() -> Result<WooClient, Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    Ok(WooClient::new(&config.store))
}
