use super::transport::{Transport, default_http_client};
use super::{AppCredentials, MonzoClient, UserCredentials};
use crate::config::MonzoConfig;
use crate::error::Result;
use oauth2::{AuthorizationCode, CsrfToken};
use reqwest::Method;
use tracing::instrument;

/// A freshly generated anti-CSRF state and the authorization URL carrying it.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub state: CsrfToken,
    pub url: String,
}

/// Entry point for the authorization-code flow.
///
/// Holds only the app credentials; a successful
/// [`exchange_authorization_code`](Self::exchange_authorization_code) hands back
/// an authenticated [`MonzoClient`].
#[derive(Debug, Clone)]
pub struct MonzoOAuth {
    transport: Transport,
    credentials: AppCredentials,
}

impl MonzoOAuth {
    pub fn new(credentials: AppCredentials, config: MonzoConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(default_http_client()?, config),
            credentials,
        })
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.transport = self.transport.with_http_client(http);
        self
    }

    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }

    pub fn config(&self) -> &MonzoConfig {
        self.transport.config()
    }

    /// The URL to send the user to, carrying the caller's `state`.
    pub fn authorization_url(&self, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", self.credentials.client_id.as_str())
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("state", state)
            .finish();

        format!(
            "{}?{}",
            self.config().auth_base_url.trim_end_matches('/'),
            query
        )
    }

    /// Like [`authorization_url`](Self::authorization_url) with a random state.
    ///
    /// Keep the returned state and compare it with the one on the redirect.
    pub fn create_authorization_request(&self) -> AuthorizationRequest {
        let state = CsrfToken::new(format!("state_{}", CsrfToken::new_random().secret()));
        let url = self.authorization_url(state.secret());

        AuthorizationRequest { state, url }
    }

    #[instrument(name = "Exchanging authorization code", skip_all)]
    pub async fn exchange_authorization_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<MonzoClient> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.secret().as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("code", code.secret().as_str()),
        ];
        let request = self
            .transport
            .unauthenticated(Method::POST, "/oauth2/token")
            .form(&form);

        let credentials: UserCredentials = self
            .transport
            .send(request, "exchange authorization code")
            .await?;

        Ok(MonzoClient::from_transport(
            self.transport.clone(),
            credentials,
            Some(self.credentials.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::monzo::credentials::test_helpers::{TOKEN_RESPONSE_JSON, mock_app_credentials};
    use crate::monzo::MonzoOperations;
    use crate::monzo::test_server::FakeServer;

    fn oauth() -> MonzoOAuth {
        MonzoOAuth::new(mock_app_credentials(), MonzoConfig::default()).unwrap()
    }

    fn oauth_for(server: &FakeServer) -> MonzoOAuth {
        MonzoOAuth::new(
            mock_app_credentials(),
            MonzoConfig::default().with_api_base_url(server.base_url()),
        )
        .unwrap()
    }

    #[test]
    fn test_authorization_url() {
        assert_eq!(
            oauth().authorization_url("state"),
            "https://auth.monzo.com?client_id=oauth2client_test&redirect_uri=https%3A%2F%2Fexample.com%2Foauth&response_type=code&state=state"
        );
    }

    #[test]
    fn test_authorization_url_encodes_state() {
        let url = oauth().authorization_url("a b&c");
        assert!(url.ends_with("&state=a+b%26c"));
    }

    #[test]
    fn test_authorization_url_uses_configured_auth_base() {
        let oauth = MonzoOAuth::new(
            mock_app_credentials(),
            MonzoConfig::default().with_auth_base_url("http://localhost:9000/"),
        )
        .unwrap();

        assert!(
            oauth
                .authorization_url("s")
                .starts_with("http://localhost:9000?client_id=oauth2client_test&")
        );
    }

    #[test]
    fn test_authorization_request_with_random_state() {
        let oauth = oauth();
        let request = oauth.create_authorization_request();
        let state = request.state.secret();

        assert!(state.starts_with("state_"));
        assert!(state.len() > "state_".len());
        assert_eq!(oauth.authorization_url(state), request.url);
        assert_ne!(
            oauth.create_authorization_request().state.secret(),
            request.state.secret()
        );
    }

    #[tokio::test]
    async fn test_exchange_authorization_code() {
        let server = FakeServer::respond_with(vec![(200, TOKEN_RESPONSE_JSON)]);

        let client = oauth_for(&server)
            .exchange_authorization_code(&AuthorizationCode::new("code_123".to_string()))
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path(), "/oauth2/token");
        assert_eq!(
            requests[0].form(),
            vec![
                ("grant_type".to_string(), "authorization_code".to_string()),
                ("client_id".to_string(), "oauth2client_test".to_string()),
                ("client_secret".to_string(), "secret".to_string()),
                (
                    "redirect_uri".to_string(),
                    "https://example.com/oauth".to_string()
                ),
                ("code".to_string(), "code_123".to_string()),
            ]
        );

        let credentials = client.credentials();
        assert_eq!(credentials.access_token.secret(), "access_456");
        assert_eq!(
            credentials.refresh_token.as_ref().unwrap().secret(),
            "refresh_456"
        );
        assert_eq!(credentials.expires_in, 21600);
        assert_eq!(credentials.token_type, "Bearer");
        assert_eq!(credentials.user_id, "user_00009238aMBIIrS5Rdncq9");

        let app = client.app_credentials().unwrap();
        assert_eq!(app.client_id, "oauth2client_test");
        assert_eq!(app.redirect_uri, "https://example.com/oauth");
    }

    #[tokio::test]
    async fn test_exchanged_client_uses_new_token() {
        let server = FakeServer::respond_with(vec![
            (200, TOKEN_RESPONSE_JSON),
            (
                200,
                r#"{"authenticated": true, "client_id": "oauth2client_test", "user_id": "user_1"}"#,
            ),
        ]);

        let client = oauth_for(&server)
            .exchange_authorization_code(&AuthorizationCode::new("code_123".to_string()))
            .await
            .unwrap();
        client.whoami().await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].authorization, None);
        assert_eq!(
            requests[1].authorization.as_deref(),
            Some("Bearer access_456")
        );
    }

    #[tokio::test]
    async fn test_failed_exchange_is_an_api_error() {
        let server = FakeServer::respond_with(vec![(
            400,
            r#"{"code": "bad_request.invalid_grant"}"#,
        )]);

        let result = oauth_for(&server)
            .exchange_authorization_code(&AuthorizationCode::new("expired".to_string()))
            .await;

        server.requests();
        assert!(matches!(result, Err(Error::Api { .. })));
    }
}
