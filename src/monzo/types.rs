use crate::id::{AccountId, TransactionId};
use crate::models::{Account, Attachment, Pot, Receipt, Transaction, Webhook};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt;

// The API wraps most list and single-resource payloads in one named field.

#[derive(Debug, Deserialize)]
pub(super) struct AccountsResponse {
    pub(super) accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PotsResponse {
    pub(super) pots: Vec<Pot>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionResponse {
    pub(super) transaction: Transaction,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionsResponse {
    pub(super) transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AttachmentResponse {
    pub(super) attachment: Attachment,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReceiptResponse {
    pub(super) receipt: Receipt,
}

#[derive(Debug, Deserialize)]
pub(super) struct WebhookResponse {
    pub(super) webhook: Webhook,
}

#[derive(Debug, Deserialize)]
pub(super) struct WebhooksResponse {
    pub(super) webhooks: Vec<Webhook>,
}

/// Lower bound of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Since {
    Time(DateTime<Utc>),
    /// Everything after this transaction
    Transaction(TransactionId),
}

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Since::Time(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Since::Transaction(id) => f.write_str(id.as_str()),
        }
    }
}

impl From<DateTime<Utc>> for Since {
    fn from(time: DateTime<Utc>) -> Self {
        Since::Time(time)
    }
}

impl From<TransactionId> for Since {
    fn from(id: TransactionId) -> Self {
        Since::Transaction(id)
    }
}

/// Cursor parameters passed straight through to the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub since: Option<Since>,
    pub before: Option<DateTime<Utc>>,
}

impl Pagination {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn since(mut self, since: impl Into<Since>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub(super) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(since) = &self.since {
            query.push(("since", since.to_string()));
        }
        if let Some(before) = &self.before {
            query.push((
                "before",
                before.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        query
    }
}

/// A `basic` feed item shown in the user's Monzo feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub image_url: String,
    pub body: Option<String>,
    /// Opened when the user taps the item
    pub url: Option<String>,
    pub background_color: Option<String>,
    pub title_color: Option<String>,
    pub body_color: Option<String>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_colors(
        mut self,
        background: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.background_color = Some(background.into());
        self.title_color = Some(title.into());
        self.body_color = Some(body.into());
        self
    }

    pub(super) fn to_form(&self, account_id: &AccountId) -> Vec<(String, String)> {
        let mut form = vec![
            ("account_id".to_string(), account_id.to_string()),
            ("type".to_string(), "basic".to_string()),
        ];
        if let Some(url) = &self.url {
            form.push(("url".to_string(), url.clone()));
        }

        let params = [
            ("title", Some(&self.title)),
            ("image_url", Some(&self.image_url)),
            ("body", self.body.as_ref()),
            ("background_color", self.background_color.as_ref()),
            ("title_color", self.title_color.as_ref()),
            ("body_color", self.body_color.as_ref()),
        ];
        for (key, value) in params {
            if let Some(value) = value {
                form.push((format!("params[{}]", key), value.clone()));
            }
        }

        form
    }
}
