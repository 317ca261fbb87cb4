use monzo_client::config::Config;
use anyhow::{Context, Result, anyhow, bail};
use monzo_client::{MonzoClient, MonzoOAuth, MonzoOperations, UserCredentials};
use oauth2::AuthorizationCode;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use tiny_http::{Response, Server};
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct CachedTokens {
    credentials: UserCredentials,
    /// Expiry time as seconds since Unix epoch
    expires_at: i64,
}

impl CachedTokens {
    fn new(credentials: UserCredentials) -> Self {
        let expires_at = chrono::Utc::now().timestamp() + credentials.expires_in as i64;
        Self {
            credentials,
            expires_at,
        }
    }

    /// Check if the access token is expired or about to expire (within 5 minutes)
    fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.expires_at < (now + 300)
    }
}

/// A client for the cached tokens, refreshing or re-authorizing as needed
#[instrument(name = "Authenticating to Monzo", skip_all)]
pub(super) async fn authenticated_client(config: &Config) -> Result<MonzoClient> {
    let Some(tokens) = load_tokens()? else {
        debug!("No cached tokens found, authorizing with Monzo...");
        return authorize(config).await;
    };

    let client = client_for(config, tokens.credentials.clone())?;
    if !tokens.is_expired() {
        debug!("Using cached Monzo tokens");
        return Ok(client);
    }

    debug!("Access token expired, refreshing...");

    match client.refresh().await {
        Ok(credentials) => {
            debug!("Token refresh successful");
            save_tokens(&CachedTokens::new(credentials.clone()))?;
            Ok(client.with_credentials(credentials))
        }
        Err(e) => {
            debug!("Token refresh failed ({}), re-authorizing...", e);
            authorize(config).await
        }
    }
}

/// A client for whatever tokens are cached, without checking them
pub(super) fn cached_client(config: &Config) -> Result<Option<MonzoClient>> {
    load_tokens()?
        .map(|tokens| client_for(config, tokens.credentials))
        .transpose()
}

fn client_for(config: &Config, credentials: UserCredentials) -> Result<MonzoClient> {
    Ok(MonzoClient::new(
        credentials,
        Some(config.monzo.app_credentials()),
        config.api.clone(),
    )?)
}

async fn authorize(config: &Config) -> Result<MonzoClient> {
    let oauth = MonzoOAuth::new(config.monzo.app_credentials(), config.api.clone())?;
    let redirect_uri = Url::parse(&config.monzo.redirect_uri)
        .context("Invalid redirect URI")?;
    let port = redirect_uri
        .port_or_known_default()
        .context("Redirect URI has no port")?;

    // Start a local server to receive the callback
    let bind_addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&bind_addr)
        .map_err(|e| anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    let auth_request = oauth.create_authorization_request();
    println!("Open this URL in your browser:\n{}", auth_request.url);
    println!();
    println!("Waiting for authorization...");

    let request = server
        .recv()
        .context("Failed to receive request")?;

    let callback_url = redirect_uri
        .join(request.url())
        .context("Failed to parse callback URL")?;
    let code = parse_callback(&callback_url, auth_request.state.secret())?;

    let response = Response::from_string("Authorization received! You can close this window.");
    request
        .respond(response)
        .context("Failed to send response")?;

    let client = oauth.exchange_authorization_code(&code).await?;
    save_tokens(&CachedTokens::new(client.credentials().clone()))?;
    info!("Approve access in the Monzo app before using the API");

    Ok(client)
}

fn parse_callback(url: &Url, expected_state: &str) -> Result<AuthorizationCode> {
    let query_value = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(error) = query_value("error") {
        bail!("Authorization denied: {}", error);
    }

    let code = query_value("code").context("No code in callback")?;
    let state = query_value("state").context("No state in callback")?;

    if state != expected_state {
        bail!("CSRF token mismatch");
    }

    Ok(AuthorizationCode::new(code))
}

fn token_cache_path() -> Result<PathBuf> {
    Ok(Config::cache_file("monzo_tokens.json")?)
}

fn load_tokens() -> Result<Option<CachedTokens>> {
    let token_path = token_cache_path()?;

    if !token_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&token_path)
        .context("Failed to read tokens file")?;

    let tokens: CachedTokens = serde_json::from_str(&contents)
        .context("Failed to parse tokens")?;

    Ok(Some(tokens))
}

fn save_tokens(tokens: &CachedTokens) -> Result<()> {
    let token_path = token_cache_path()?;

    if let Some(parent) = token_path.parent() {
        fs::create_dir_all(parent).context("Failed to create token cache directory")?;
    }

    let contents = serde_json::to_string_pretty(tokens)?;

    // Owner-only from the start, the file holds a refresh token
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(0o600)
        .open(&token_path)
        .context("Failed to create tokens file")?;

    file.write_all(contents.as_bytes())
        .context("Failed to write tokens file")?;

    Ok(())
}

/// Clear cached Monzo tokens by deleting the token cache file
#[instrument(name = "Clearing auth tokens for Monzo", skip_all)]
pub(super) fn clear_tokens() -> Result<()> {
    let token_path = token_cache_path()?;

    if !token_path.exists() {
        debug!("No Monzo tokens to clear");
        return Ok(());
    }

    fs::remove_file(&token_path)
        .context("Failed to delete tokens file")?;
    info!("Cleared Monzo cached tokens");

    Ok(())
}
