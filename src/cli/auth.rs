use super::session;
use monzo_client::config::Config;
use anyhow::Result;
use monzo_client::MonzoOperations;
use tracing::info;

pub async fn execute(reset: bool) -> Result<()> {
    if reset {
        session::clear_tokens()?;
    }

    let config = Config::load()?;
    let client = session::authenticated_client(&config).await?;
    let whoami = client.whoami().await?;

    info!(user_id = %whoami.user_id, "Monzo authentication verified");

    Ok(())
}

pub async fn logout() -> Result<()> {
    let config = Config::load()?;
    let Some(client) = session::cached_client(&config)? else {
        info!("Not logged in");
        return Ok(());
    };

    client.logout().await?;
    session::clear_tokens()?;
    info!("Logged out");

    Ok(())
}
