//! Typed client for the [Monzo](https://docs.monzo.com) banking API.
//!
//! Start with [`MonzoOAuth`] to send a user through the authorization-code flow,
//! then call endpoints on the [`MonzoClient`] it returns (the endpoint methods
//! live on the [`MonzoOperations`] trait):
//!
//! ```rust,no_run
//! use monzo_client::{AppCredentials, MonzoConfig, MonzoOAuth, MonzoOperations, Pagination};
//! use monzo_client::id::ClientId;
//! use oauth2::{AuthorizationCode, ClientSecret};
//!
//! # async fn run() -> monzo_client::Result<()> {
//! let oauth = MonzoOAuth::new(
//!     AppCredentials {
//!         client_id: ClientId::cast("oauth2client_00009abc")?,
//!         client_secret: ClientSecret::new("secret".to_string()),
//!         redirect_uri: "https://example.com/oauth".to_string(),
//!     },
//!     MonzoConfig::default(),
//! )?;
//!
//! let request = oauth.create_authorization_request();
//! println!("Open {}", request.url);
//!
//! // ...the user comes back to the redirect URI with `code` and `state`
//! let client = oauth
//!     .exchange_authorization_code(&AuthorizationCode::new("code".to_string()))
//!     .await?;
//!
//! for account in client.accounts(None, &Pagination::default()).await? {
//!     let balance = client.balance(&account.id).await?;
//!     println!("{}: {}", account.description, balance.balance);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The library never retries, stores tokens, or generates dedupe ids; those
//! decisions belong to the caller.

pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod monzo;

pub use config::MonzoConfig;
pub use error::{Error, Result};
pub use monzo::{
    AppCredentials, AuthorizationRequest, FeedItem, MonzoClient, MonzoOAuth, MonzoOperations,
    Pagination, Since, UserCredentials,
};
