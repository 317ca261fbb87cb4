use super::Currency;
use crate::id::{AccountId, PotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pot {
    pub id: PotId,
    pub name: String,
    #[serde(default)]
    pub style: String,
    pub balance: i64,
    pub currency: Currency,
    pub goal_amount: Option<i64>,
    #[serde(rename = "type", default)]
    pub pot_type: String,
    #[serde(default)]
    pub product_id: String,
    pub current_account_id: Option<AccountId>,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub isa_wrapper: String,
    #[serde(default)]
    pub round_up: bool,
    pub round_up_multiplier: Option<i64>,
    #[serde(default)]
    pub is_tax_pot: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub locked: bool,
    pub charity_id: Option<String>,
    #[serde(default)]
    pub available_for_bills: bool,
    #[serde(default)]
    pub has_virtual_cards: bool,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pot_deserialization_with_sparse_fields() {
        let pot: Pot = serde_json::from_str(test_helpers::POT_JSON).unwrap();

        assert_eq!(pot.id, "pot_0000778xxfgh4iu8z83nWb");
        assert_eq!(pot.balance, 133700);
        assert_eq!(pot.pot_type, "default");
        assert!(pot.round_up);
        assert!(!pot.locked);
        assert!(pot.goal_amount.is_none());
    }
}
