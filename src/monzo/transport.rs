use crate::config::MonzoConfig;
use crate::error::{Error, Result};
use oauth2::AccessToken;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("monzo-client/", env!("CARGO_PKG_VERSION"));

/// Issues requests against the configured API base URL, attaching the bearer
/// token when one is set.
#[derive(Debug, Clone)]
pub(super) struct Transport {
    http: Client,
    config: MonzoConfig,
    access_token: Option<AccessToken>,
}

pub(super) fn default_http_client() -> Result<Client> {
    reqwest::ClientBuilder::new()
        .redirect(Policy::none())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build reqwest client: {}", e)))
}

impl Transport {
    pub(super) fn new(http: Client, config: MonzoConfig) -> Self {
        Self {
            http,
            config,
            access_token: None,
        }
    }

    pub(super) fn with_access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    pub(super) fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub(super) fn http_client(&self) -> Client {
        self.http.clone()
    }

    pub(super) fn config(&self) -> &MonzoConfig {
        &self.config
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.unauthenticated(method, path);
        match &self.access_token {
            Some(token) => request.bearer_auth(token.secret()),
            None => request,
        }
    }

    /// Token endpoints authenticate with the app credentials in the body instead.
    pub(super) fn unauthenticated(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Sending request");
        self.http.request(method, self.config.api_url(path))
    }

    pub(super) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let response = Self::check(request.send().await?, action).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Unexpected response body to {}", action);
            Error::Serialization(e)
        })
    }

    /// For endpoints that answer with an empty `{}`.
    pub(super) async fn send_empty(&self, request: RequestBuilder, action: &str) -> Result<()> {
        Self::check(request.send().await?, action).await?;
        Ok(())
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "Failed to {}", action);

        Err(Error::Api { status, body })
    }
}
