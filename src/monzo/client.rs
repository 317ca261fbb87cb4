use super::transport::{Transport, default_http_client};
use super::types::{
    AccountsResponse, AttachmentResponse, PotsResponse, ReceiptResponse, TransactionResponse,
    TransactionsResponse, WebhookResponse, WebhooksResponse,
};
use super::{AppCredentials, FeedItem, MonzoOperations, Pagination, UserCredentials};
use crate::config::MonzoConfig;
use crate::error::{Error, Result};
use crate::id::{AccountId, AttachmentId, PotId, TransactionId, WebhookId};
use crate::models::{
    Account, AccountType, Attachment, Balance, Pot, Receipt, Transaction, UploadUrl, Webhook,
    WhoAmI,
};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

/// Client for the authenticated Monzo API.
///
/// Holds the user's credentials and, when built from an OAuth exchange or
/// given explicitly, the app credentials needed to refresh them.
#[derive(Debug, Clone)]
pub struct MonzoClient {
    transport: Transport,
    credentials: UserCredentials,
    app: Option<AppCredentials>,
}

impl MonzoClient {
    pub fn new(
        credentials: UserCredentials,
        app: Option<AppCredentials>,
        config: MonzoConfig,
    ) -> Result<Self> {
        let transport = Transport::new(default_http_client()?, config);
        Ok(Self::from_transport(transport, credentials, app))
    }

    pub(super) fn from_transport(
        transport: Transport,
        credentials: UserCredentials,
        app: Option<AppCredentials>,
    ) -> Self {
        Self {
            transport: transport.with_access_token(credentials.access_token.clone()),
            credentials,
            app,
        }
    }

    /// Use a caller-configured HTTP client, e.g. one with timeouts.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.transport = self.transport.with_http_client(http);
        self
    }

    /// A client for freshly refreshed credentials, sharing everything else.
    pub fn with_credentials(&self, credentials: UserCredentials) -> Self {
        Self::from_transport(self.transport.clone(), credentials, self.app.clone())
    }

    pub fn credentials(&self) -> &UserCredentials {
        &self.credentials
    }

    pub fn app_credentials(&self) -> Option<&AppCredentials> {
        self.app.as_ref()
    }

    pub fn config(&self) -> &MonzoConfig {
        self.transport.config()
    }

    pub fn http_client(&self) -> reqwest::Client {
        self.transport.http_client()
    }

    async fn pot_transfer(
        &self,
        pot_id: &PotId,
        direction: &str,
        account_field: &str,
        account_id: &AccountId,
        amount: i64,
        dedupe_id: &str,
    ) -> Result<Pot> {
        let form = [
            (account_field, account_id.to_string()),
            ("amount", amount.to_string()),
            ("dedupe_id", dedupe_id.to_string()),
        ];
        let request = self
            .transport
            .request(Method::PUT, &format!("/pots/{}/{}", pot_id, direction))
            .form(&form);

        self.transport
            .send(request, &format!("{} pot", direction))
            .await
    }
}

fn expand_query(expand_merchant: bool) -> Vec<(&'static str, String)> {
    match expand_merchant {
        true => vec![("expand[]", "merchant".to_string())],
        false => Vec::new(),
    }
}

#[async_trait]
impl MonzoOperations for MonzoClient {
    #[instrument(name = "Checking access token", skip_all)]
    async fn whoami(&self) -> Result<WhoAmI> {
        let request = self.transport.request(Method::GET, "/ping/whoami");
        self.transport.send(request, "check access token").await
    }

    #[instrument(name = "Logging out", skip_all)]
    async fn logout(&self) -> Result<()> {
        let request = self.transport.request(Method::POST, "/ping/logout");
        self.transport.send_empty(request, "log out").await
    }

    #[instrument(name = "Refreshing access token", skip_all)]
    async fn refresh(&self) -> Result<UserCredentials> {
        let app = self.app.as_ref().ok_or(Error::MissingAppCredentials)?;
        let refresh_token = self
            .credentials
            .refresh_token
            .as_ref()
            .ok_or(Error::MissingRefreshToken)?;

        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", app.client_id.as_str()),
            ("client_secret", app.client_secret.secret().as_str()),
            ("refresh_token", refresh_token.secret().as_str()),
        ];
        let request = self
            .transport
            .unauthenticated(Method::POST, "/oauth2/token")
            .form(&form);

        self.transport.send(request, "refresh access token").await
    }

    #[instrument(name = "Fetching accounts", skip_all)]
    async fn accounts(
        &self,
        account_type: Option<AccountType>,
        pagination: &Pagination,
    ) -> Result<Vec<Account>> {
        let mut query = Vec::new();
        if let Some(account_type) = account_type {
            query.push(("account_type", account_type.as_str().to_string()));
        }
        query.extend(pagination.to_query());

        let request = self
            .transport
            .request(Method::GET, "/accounts")
            .query(&query);

        let response: AccountsResponse = self.transport.send(request, "list accounts").await?;
        Ok(response.accounts)
    }

    #[instrument(name = "Fetching balance", skip_all, fields(%account_id))]
    async fn balance(&self, account_id: &AccountId) -> Result<Balance> {
        let request = self
            .transport
            .request(Method::GET, "/balance")
            .query(&[("account_id", account_id.as_str())]);

        self.transport.send(request, "read balance").await
    }

    #[instrument(name = "Fetching pots", skip_all, fields(%current_account_id))]
    async fn pots(&self, current_account_id: &AccountId) -> Result<Vec<Pot>> {
        let request = self
            .transport
            .request(Method::GET, "/pots")
            .query(&[("current_account_id", current_account_id.as_str())]);

        let response: PotsResponse = self.transport.send(request, "list pots").await?;
        Ok(response.pots)
    }

    #[instrument(name = "Depositing into pot", skip_all, fields(%pot_id, %amount))]
    async fn deposit_into_pot(
        &self,
        pot_id: &PotId,
        source_account_id: &AccountId,
        amount: i64,
        dedupe_id: &str,
    ) -> Result<Pot> {
        self.pot_transfer(
            pot_id,
            "deposit",
            "source_account_id",
            source_account_id,
            amount,
            dedupe_id,
        )
        .await
    }

    #[instrument(name = "Withdrawing from pot", skip_all, fields(%pot_id, %amount))]
    async fn withdraw_from_pot(
        &self,
        pot_id: &PotId,
        destination_account_id: &AccountId,
        amount: i64,
        dedupe_id: &str,
    ) -> Result<Pot> {
        self.pot_transfer(
            pot_id,
            "withdraw",
            "destination_account_id",
            destination_account_id,
            amount,
            dedupe_id,
        )
        .await
    }

    #[instrument(name = "Fetching transaction", skip_all, fields(%transaction_id))]
    async fn transaction(
        &self,
        transaction_id: &TransactionId,
        expand_merchant: bool,
    ) -> Result<Transaction> {
        let request = self
            .transport
            .request(Method::GET, &format!("/transactions/{}", transaction_id))
            .query(&expand_query(expand_merchant));

        let response: TransactionResponse =
            self.transport.send(request, "get transaction").await?;
        Ok(response.transaction)
    }

    #[instrument(name = "Fetching transactions", skip_all, fields(%account_id))]
    async fn transactions(
        &self,
        account_id: &AccountId,
        pagination: &Pagination,
        expand_merchant: bool,
    ) -> Result<Vec<Transaction>> {
        let mut query = vec![("account_id", account_id.to_string())];
        query.extend(expand_query(expand_merchant));
        query.extend(pagination.to_query());

        let request = self
            .transport
            .request(Method::GET, "/transactions")
            .query(&query);

        let response: TransactionsResponse =
            self.transport.send(request, "list transactions").await?;
        Ok(response.transactions)
    }

    #[instrument(name = "Annotating transaction", skip_all, fields(%transaction_id))]
    async fn annotate_transaction(
        &self,
        transaction_id: &TransactionId,
        metadata: &[(&str, &str)],
    ) -> Result<Transaction> {
        let form: Vec<(String, &str)> = metadata
            .iter()
            .map(|(key, value)| (format!("metadata[{}]", key), *value))
            .collect();
        let request = self
            .transport
            .request(Method::PATCH, &format!("/transactions/{}", transaction_id))
            .form(&form);

        let response: TransactionResponse =
            self.transport.send(request, "annotate transaction").await?;
        Ok(response.transaction)
    }

    #[instrument(name = "Creating feed item", skip_all, fields(%account_id))]
    async fn create_feed_item(&self, account_id: &AccountId, item: &FeedItem) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/feed")
            .form(&item.to_form(account_id));

        self.transport.send_empty(request, "create feed item").await
    }

    #[instrument(name = "Requesting attachment upload", skip_all)]
    async fn upload_attachment(
        &self,
        file_name: &str,
        file_type: &str,
        content_length: u64,
    ) -> Result<UploadUrl> {
        let form = [
            ("file_name", file_name.to_string()),
            ("file_type", file_type.to_string()),
            ("content_length", content_length.to_string()),
        ];
        let request = self
            .transport
            .request(Method::POST, "/attachment/upload")
            .form(&form);

        self.transport.send(request, "request attachment upload").await
    }

    #[instrument(name = "Registering attachment", skip_all, fields(%transaction_id))]
    async fn register_attachment(
        &self,
        transaction_id: &TransactionId,
        file_url: &str,
        file_type: &str,
    ) -> Result<Attachment> {
        let form = [
            ("external_id", transaction_id.as_str()),
            ("file_url", file_url),
            ("file_type", file_type),
        ];
        let request = self
            .transport
            .request(Method::POST, "/attachment/register")
            .form(&form);

        let response: AttachmentResponse =
            self.transport.send(request, "register attachment").await?;
        Ok(response.attachment)
    }

    #[instrument(name = "Deregistering attachment", skip_all, fields(%attachment_id))]
    async fn deregister_attachment(&self, attachment_id: &AttachmentId) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/attachment/deregister")
            .form(&[("id", attachment_id.as_str())]);

        self.transport
            .send_empty(request, "deregister attachment")
            .await
    }

    #[instrument(name = "Creating receipt", skip_all, fields(external_id = %receipt.external_id))]
    async fn create_receipt(&self, receipt: &Receipt) -> Result<()> {
        let request = self
            .transport
            .request(Method::PUT, "/transaction-receipts")
            .json(receipt);

        self.transport.send_empty(request, "create receipt").await
    }

    #[instrument(name = "Fetching receipt", skip_all, fields(%external_id))]
    async fn receipt(&self, external_id: &str) -> Result<Receipt> {
        let request = self
            .transport
            .request(Method::GET, "/transaction-receipts")
            .query(&[("external_id", external_id)]);

        let response: ReceiptResponse = self.transport.send(request, "get receipt").await?;
        Ok(response.receipt)
    }

    #[instrument(name = "Deleting receipt", skip_all, fields(%external_id))]
    async fn delete_receipt(&self, external_id: &str) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, "/transaction-receipts")
            .query(&[("external_id", external_id)]);

        self.transport.send_empty(request, "delete receipt").await
    }

    #[instrument(name = "Registering webhook", skip_all, fields(%account_id))]
    async fn register_webhook(&self, account_id: &AccountId, url: &str) -> Result<Webhook> {
        let form = [("account_id", account_id.as_str()), ("url", url)];
        let request = self
            .transport
            .request(Method::POST, "/webhooks")
            .form(&form);

        let response: WebhookResponse = self.transport.send(request, "register webhook").await?;
        Ok(response.webhook)
    }

    #[instrument(name = "Fetching webhooks", skip_all, fields(%account_id))]
    async fn webhooks(&self, account_id: &AccountId) -> Result<Vec<Webhook>> {
        let request = self
            .transport
            .request(Method::GET, "/webhooks")
            .query(&[("account_id", account_id.as_str())]);

        let response: WebhooksResponse = self.transport.send(request, "list webhooks").await?;
        Ok(response.webhooks)
    }

    #[instrument(name = "Deleting webhook", skip_all, fields(%webhook_id))]
    async fn delete_webhook(&self, webhook_id: &WebhookId) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, &format!("/webhooks/{}", webhook_id));

        self.transport.send_empty(request, "delete webhook").await
    }
}
