use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Monzo does not publish the full list, these are the codes seen in practice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    Eur,
    Usd,
    Aud,
    Cad,
    Chf,
    Cny,
    Dkk,
    Hkd,
    Jpy,
    Nzd,
    Pln,
    Rub,
    Sek,
    Sgd,
    Thb,
    Try,
    Zar,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Currency {
    /// Number of decimal places between the minor and major unit.
    pub fn exponent(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Amounts on the wire are integers in minor units (pence, cents).
    pub fn to_major_units(&self, minor: i64) -> Decimal {
        Decimal::new(minor, self.exponent())
    }
}
