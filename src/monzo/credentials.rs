use crate::id::{ClientId, UserId};
use oauth2::{AccessToken, ClientSecret, RefreshToken};
use serde::{Deserialize, Serialize};

/// Credentials of the registered OAuth client (the "app").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_uri: String,
}

/// Token response from `/oauth2/token`.
///
/// Never updated in place; refreshing yields a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    pub access_token: AccessToken,
    pub client_id: ClientId,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
    /// Only issued to confidential clients
    pub refresh_token: Option<RefreshToken>,
    pub token_type: String,
    pub user_id: UserId,
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub(crate) fn mock_app_credentials() -> AppCredentials {
        AppCredentials {
            client_id: ClientId::new_unchecked("oauth2client_test"),
            client_secret: ClientSecret::new("secret".to_string()),
            redirect_uri: "https://example.com/oauth".to_string(),
        }
    }

    pub(crate) fn mock_user_credentials() -> UserCredentials {
        UserCredentials {
            access_token: AccessToken::new("access_123".to_string()),
            client_id: ClientId::new_unchecked("oauth2client_test"),
            expires_in: 21600,
            refresh_token: Some(RefreshToken::new("refresh_123".to_string())),
            token_type: "Bearer".to_string(),
            user_id: UserId::new_unchecked("user_00009238aMBIIrS5Rdncq9"),
        }
    }

    pub(crate) const TOKEN_RESPONSE_JSON: &str = r#"{
        "access_token": "access_456",
        "client_id": "oauth2client_test",
        "expires_in": 21600,
        "refresh_token": "refresh_456",
        "token_type": "Bearer",
        "user_id": "user_00009238aMBIIrS5Rdncq9"
    }"#;
}
