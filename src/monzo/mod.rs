mod client;
mod credentials;
mod oauth;
mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::MonzoClient;
pub use credentials::{AppCredentials, UserCredentials};
pub use oauth::{AuthorizationRequest, MonzoOAuth};
pub use types::{FeedItem, Pagination, Since};

use crate::error::Result;
use crate::id::{AccountId, AttachmentId, PotId, TransactionId, WebhookId};
use crate::models::{
    Account, AccountType, Attachment, Balance, Pot, Receipt, Transaction, UploadUrl, Webhook,
    WhoAmI,
};

use async_trait::async_trait;

/// Every authenticated endpoint of the Monzo API, one request per call.
#[async_trait]
pub trait MonzoOperations {
    async fn whoami(&self) -> Result<WhoAmI>;

    /// Invalidate the access token.
    async fn logout(&self) -> Result<()>;

    /// Exchange the refresh token for a new set of credentials.
    ///
    /// Fails without touching the network if the client has no app credentials
    /// or no refresh token.
    async fn refresh(&self) -> Result<UserCredentials>;

    async fn accounts(
        &self,
        account_type: Option<AccountType>,
        pagination: &Pagination,
    ) -> Result<Vec<Account>>;

    async fn balance(&self, account_id: &AccountId) -> Result<Balance>;

    async fn pots(&self, current_account_id: &AccountId) -> Result<Vec<Pot>>;

    /// Move `amount` (minor units) from an account into a pot.
    ///
    /// `dedupe_id` must stay the same across retries of the same deposit.
    async fn deposit_into_pot(
        &self,
        pot_id: &PotId,
        source_account_id: &AccountId,
        amount: i64,
        dedupe_id: &str,
    ) -> Result<Pot>;

    /// Move `amount` (minor units) out of a pot into an account.
    ///
    /// `dedupe_id` must stay the same across retries of the same withdrawal.
    async fn withdraw_from_pot(
        &self,
        pot_id: &PotId,
        destination_account_id: &AccountId,
        amount: i64,
        dedupe_id: &str,
    ) -> Result<Pot>;

    async fn transaction(
        &self,
        transaction_id: &TransactionId,
        expand_merchant: bool,
    ) -> Result<Transaction>;

    async fn transactions(
        &self,
        account_id: &AccountId,
        pagination: &Pagination,
        expand_merchant: bool,
    ) -> Result<Vec<Transaction>>;

    /// Set metadata keys on a transaction. An empty value deletes the key.
    async fn annotate_transaction(
        &self,
        transaction_id: &TransactionId,
        metadata: &[(&str, &str)],
    ) -> Result<Transaction>;

    async fn create_feed_item(&self, account_id: &AccountId, item: &FeedItem) -> Result<()>;

    async fn upload_attachment(
        &self,
        file_name: &str,
        file_type: &str,
        content_length: u64,
    ) -> Result<UploadUrl>;

    async fn register_attachment(
        &self,
        transaction_id: &TransactionId,
        file_url: &str,
        file_type: &str,
    ) -> Result<Attachment>;

    async fn deregister_attachment(&self, attachment_id: &AttachmentId) -> Result<()>;

    async fn create_receipt(&self, receipt: &Receipt) -> Result<()>;

    async fn receipt(&self, external_id: &str) -> Result<Receipt>;

    async fn delete_receipt(&self, external_id: &str) -> Result<()>;

    async fn register_webhook(&self, account_id: &AccountId, url: &str) -> Result<Webhook>;

    async fn webhooks(&self, account_id: &AccountId) -> Result<Vec<Webhook>>;

    async fn delete_webhook(&self, webhook_id: &WebhookId) -> Result<()>;
}
