//! Typed resource identifiers.
//!
//! Every Monzo resource id looks like `<prefix>_<opaque suffix>`, e.g.
//! `acc_00009237aqC8c5umZmrRdh` or `tx_00008zIcpb1TB4yeIFXMzx`. The prefix is the only
//! thing we can check locally, so that is all validation does.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Known identifier prefixes, in the order they are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    Account,
    Pot,
    User,
    OAuth2Client,
    Transaction,
    Group,
    Merchant,
    Business,
    EntrySet,
    ObExtPayment,
    PotDeposit,
    AnonUser,
    McAuthMsg,
    McLifecycle,
    McCard,
    Attachment,
    Tab,
    Participant,
    Webhook,
    Receipt,
}

impl IdPrefix {
    pub const ALL: [IdPrefix; 20] = [
        IdPrefix::Account,
        IdPrefix::Pot,
        IdPrefix::User,
        IdPrefix::OAuth2Client,
        IdPrefix::Transaction,
        IdPrefix::Group,
        IdPrefix::Merchant,
        IdPrefix::Business,
        IdPrefix::EntrySet,
        IdPrefix::ObExtPayment,
        IdPrefix::PotDeposit,
        IdPrefix::AnonUser,
        IdPrefix::McAuthMsg,
        IdPrefix::McLifecycle,
        IdPrefix::McCard,
        IdPrefix::Attachment,
        IdPrefix::Tab,
        IdPrefix::Participant,
        IdPrefix::Webhook,
        IdPrefix::Receipt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Account => "acc",
            IdPrefix::Pot => "pot",
            IdPrefix::User => "user",
            IdPrefix::OAuth2Client => "oauth2client",
            IdPrefix::Transaction => "tx",
            IdPrefix::Group => "grp",
            IdPrefix::Merchant => "merch",
            IdPrefix::Business => "business",
            IdPrefix::EntrySet => "entryset",
            IdPrefix::ObExtPayment => "obextpayment",
            IdPrefix::PotDeposit => "potdep",
            IdPrefix::AnonUser => "anonuser",
            IdPrefix::McAuthMsg => "mcauthmsg",
            IdPrefix::McLifecycle => "mclifecycle",
            IdPrefix::McCard => "mccard",
            IdPrefix::Attachment => "attach",
            IdPrefix::Tab => "tab",
            IdPrefix::Participant => "participant",
            IdPrefix::Webhook => "webhook",
            IdPrefix::Receipt => "receipt",
        }
    }

    /// Whether `id` starts with this prefix followed by `_`.
    pub fn matches(&self, id: &str) -> bool {
        id.strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Detect the prefix of an arbitrary id string.
    pub fn of(id: &str) -> Option<IdPrefix> {
        Self::ALL.into_iter().find(|prefix| prefix.matches(id))
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPrefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|prefix| prefix.as_str() == s)
            .ok_or_else(|| Error::InvalidId {
                id: s.to_string(),
                expected: None,
            })
    }
}

/// Check `id` against `prefix`, or against every known prefix when none is given.
pub fn validate_id(id: &str, prefix: Option<IdPrefix>) -> bool {
    match prefix {
        Some(prefix) => prefix.matches(id),
        None => IdPrefix::of(id).is_some(),
    }
}

/// Like [`validate_id`] but fails with [`Error::InvalidId`].
pub fn assert_id(id: &str, prefix: Option<IdPrefix>) -> Result<()> {
    if validate_id(id, prefix) {
        return Ok(());
    }

    Err(Error::InvalidId {
        id: id.to_string(),
        expected: prefix,
    })
}

/// Validate `id` and return it typed as an [`Id<K>`].
pub fn cast_id<K: IdKind>(id: impl Into<String>) -> Result<Id<K>> {
    Id::cast(id)
}

/// Marker for a kind of resource identified by a fixed prefix.
pub trait IdKind {
    const PREFIX: IdPrefix;
}

macro_rules! id_kinds {
    ($($kind:ident => $prefix:ident, $alias:ident;)*) => {
        /// Marker types for [`Id`].
        pub mod kind {
            $(
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum $kind {}

                impl super::IdKind for $kind {
                    const PREFIX: super::IdPrefix = super::IdPrefix::$prefix;
                }
            )*
        }

        $(pub type $alias = Id<kind::$kind>;)*
    };
}

id_kinds! {
    Account => Account, AccountId;
    Pot => Pot, PotId;
    User => User, UserId;
    OAuth2Client => OAuth2Client, ClientId;
    Transaction => Transaction, TransactionId;
    Group => Group, GroupId;
    Merchant => Merchant, MerchantId;
    Business => Business, BusinessId;
    Attachment => Attachment, AttachmentId;
    Tab => Tab, TabId;
    Participant => Participant, ParticipantId;
    Webhook => Webhook, WebhookId;
    Receipt => Receipt, ReceiptId;
}

/// A resource id of kind `K`.
///
/// Values that come back from the API are trusted and are not re-validated on
/// deserialization; use [`Id::cast`] for ids that come from elsewhere.
pub struct Id<K> {
    value: String,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> Id<K> {
    pub fn cast(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if !K::PREFIX.matches(&id) {
            return Err(Error::InvalidId {
                id,
                expected: Some(K::PREFIX),
            });
        }

        Ok(Self::new_unchecked(id))
    }

    pub fn is_valid(&self) -> bool {
        K::PREFIX.matches(&self.value)
    }
}

impl<K> Id<K> {
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self {
            value: id.into(),
            kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl<K: IdKind> FromStr for Id<K> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::cast(s)
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self::new_unchecked(self.value.clone())
    }
}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> PartialEq<str> for Id<K> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<K> PartialEq<&str> for Id<K> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl<K> AsRef<str> for Id<K> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, K> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new_unchecked)
    }
}
