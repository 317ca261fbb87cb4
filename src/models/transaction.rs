use super::{Attachment, Currency};
use crate::id::{AccountId, GroupId, MerchantId, ParticipantId, TabId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// https://docs.monzo.com/#transactions
// Most of the fields below are undocumented and typed from observed responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub amount: i64,
    #[serde(default)]
    pub amount_is_pending: bool,
    pub atm_fees_detailed: Option<AtmFeesDetailed>,
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default)]
    pub can_add_to_tab: bool,
    #[serde(default)]
    pub can_be_excluded_from_breakdown: bool,
    #[serde(default)]
    pub can_be_made_subscription: bool,
    #[serde(default)]
    pub can_match_transactions_in_categorization: bool,
    #[serde(default)]
    pub can_split_the_bill: bool,
    pub categories: Option<HashMap<String, i64>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub counterparty: Counterparty,
    pub created: DateTime<Utc>,
    pub currency: Currency,
    #[serde(default)]
    pub dedupe_id: String,
    #[serde(default)]
    pub description: String,
    /// Never observed populated, kept as raw JSON.
    #[serde(default)]
    pub fees: serde_json::Value,
    #[serde(default)]
    pub include_in_spending: bool,
    /// Never observed populated, kept as raw JSON.
    #[serde(default)]
    pub international: serde_json::Value,
    #[serde(default)]
    pub is_load: bool,
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub local_amount: i64,
    #[serde(default)]
    pub local_currency: String,
    pub merchant: Option<MerchantRef>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub originator: bool,
    #[serde(default)]
    pub parent_account_id: String,
    /// e.g. `mastercard`, `payport_faster_payments`, `uk_retail_pot`
    #[serde(default)]
    pub scheme: String,
    /// Empty while the transaction is pending.
    #[serde(default)]
    pub settled: String,
    #[serde(default)]
    pub updated: String,
    /// Empty for some system transactions.
    #[serde(default)]
    pub user_id: String,
    pub decline_reason: Option<String>,
    pub tab: Option<Tab>,
}

impl Transaction {
    pub fn is_declined(&self) -> bool {
        self.decline_reason.is_some()
    }

    pub fn merchant_name(&self) -> Option<&str> {
        match self.merchant.as_ref()? {
            MerchantRef::Expanded(merchant) => Some(&merchant.name),
            MerchantRef::Id(_) => None,
        }
    }
}

/// `merchant` is a bare id unless the request asked for `expand[]=merchant`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MerchantRef {
    Id(MerchantId),
    Expanded(Box<Merchant>),
}

impl MerchantRef {
    pub fn id(&self) -> &MerchantId {
        match self {
            MerchantRef::Id(id) => id,
            MerchantRef::Expanded(merchant) => &merchant.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Merchant {
    pub id: MerchantId,
    pub group_id: Option<GroupId>,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub category: String,
    pub created: Option<DateTime<Utc>>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Counterparty {
    pub account_number: Option<String>,
    pub name: Option<String>,
    pub sort_code: Option<String>,
    /// A `user_` or `anonuser_` id.
    pub user_id: Option<String>,
    pub beneficiary_account_type: Option<String>,
    pub account_id: Option<AccountId>,
    pub preferred_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtmFeesDetailed {
    pub allowance_id: String,
    pub allowance_usage_explainer_text: String,
    pub fee_amount: i64,
    pub fee_currency: String,
    #[serde(default)]
    pub fee_summary: serde_json::Value,
    pub withdrawal_amount: i64,
    pub withdrawal_currency: String,
}

/// A shared bill the transaction was added to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub name: String,
    pub created_by: String,
    pub currency: String,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub left_participants: Vec<serde_json::Value>,
    pub modified_at: String,
    pub opened_at: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub status: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub tab_id: TabId,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    pub invited_at: Option<String>,
    pub invited_by: Option<String>,
    pub payment_status: String,
    pub settle_amount: i64,
    pub settle_currency: String,
    pub status: String,
    pub total_amount: i64,
    pub total_currency: String,
}
