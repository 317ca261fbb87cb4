use super::Currency;
use crate::id::{AccountId, BusinessId, ClientId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    #[serde(default)]
    pub closed: bool,
    pub created: DateTime<Utc>,
    pub description: String,
    // Older responses carry only id, created and description
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub owners: Vec<AccountOwner>,
    pub account_number: Option<String>,
    pub sort_code: Option<String>,
    pub payment_details: Option<PaymentDetails>,
    pub business_id: Option<BusinessId>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    UkRetail,
    UkRetailJoint,
    UkRetailPlus,
    UkPersonal,
    UkBusiness,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::UkRetail => "uk_retail",
            AccountType::UkRetailJoint => "uk_retail_joint",
            AccountType::UkRetailPlus => "uk_retail_plus",
            AccountType::UkPersonal => "uk_personal",
            AccountType::UkBusiness => "uk_business",
            AccountType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountOwner {
    pub user_id: UserId,
    #[serde(default)]
    pub preferred_name: String,
    #[serde(default)]
    pub preferred_first_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentDetails {
    pub locale_uk: Option<LocaleUk>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleUk {
    pub account_number: String,
    pub sort_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub balance: i64,
    pub total_balance: i64,
    pub balance_including_flexible_savings: Option<i64>,
    pub currency: Currency,
    pub spend_today: i64,
    /// Empty when no foreign spending happened today.
    #[serde(default)]
    pub local_currency: String,
    #[serde(default)]
    pub local_exchange_rate: f64,
    #[serde(default)]
    pub local_spend: Vec<serde_json::Value>,
}

/// Result of `GET /ping/whoami`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhoAmI {
    pub authenticated: bool,
    pub client_id: ClientId,
    pub user_id: UserId,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialization() {
        let account: Account = serde_json::from_str(test_helpers::ACCOUNT_JSON).unwrap();

        assert_eq!(account.id, "acc_00009237aqC8c5umZmrRdh");
        assert_eq!(account.account_type, AccountType::UkRetail);
        assert_eq!(account.currency, Currency::Gbp);
        assert_eq!(account.owners[0].preferred_first_name, "Peter");
        assert_eq!(
            account.payment_details.unwrap().locale_uk.unwrap().sort_code,
            "040004"
        );
        assert!(account.business_id.is_none());
    }

    #[test]
    fn test_unknown_account_type() {
        let json = test_helpers::ACCOUNT_JSON.replace("uk_retail", "uk_rewards");
        let account: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.account_type, AccountType::Unknown);
    }

    #[test]
    fn test_minimal_account_deserialization() {
        let account: Account = serde_json::from_str(
            r#"{
                "id": "acc_00009237aqC8c5umZmrRdh",
                "created": "2015-11-13T12:17:42.102Z",
                "description": "Peter Pan's Account"
            }"#,
        )
        .unwrap();

        assert_eq!(account.description, "Peter Pan's Account");
        assert_eq!(account.account_type, AccountType::Unknown);
        assert_eq!(account.currency, Currency::Unknown);
        assert!(!account.closed);
    }

    #[test]
    fn test_balance_deserialization() {
        let balance: Balance = serde_json::from_str(
            r#"{
                "balance": 5000,
                "total_balance": 6000,
                "balance_including_flexible_savings": 6000,
                "currency": "GBP",
                "spend_today": -120,
                "local_currency": "",
                "local_exchange_rate": 0,
                "local_spend": []
            }"#,
        )
        .unwrap();

        assert_eq!(balance.balance, 5000);
        assert_eq!(balance.spend_today, -120);
        assert!(balance.local_currency.is_empty());
    }
}
