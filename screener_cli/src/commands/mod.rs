//! CLI subcommand implementations.

pub mod run;
pub mod show;

use anyhow::Result;
use screener_lib::screener_api::Client;

/// Client for `base_url`, or for the production site when none is given.
fn client_for(base_url: Option<&str>) -> Result<Client> {
    let client = match base_url {
        Some(url) => Client::with_base_url(url)?,
        None => Client::new()?,
    };
    Ok(client)
}
