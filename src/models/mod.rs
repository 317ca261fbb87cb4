pub mod account;
pub mod attachment;
pub mod currency;
pub mod pot;
pub mod receipt;
pub mod transaction;
pub mod webhook;

pub use account::{Account, AccountType, Balance, WhoAmI};
pub use attachment::{Attachment, UploadUrl};
pub use currency::Currency;
pub use pot::Pot;
pub use receipt::{Receipt, ReceiptItem, ReceiptMerchant, ReceiptPayment, ReceiptTax};
pub use transaction::{Counterparty, Merchant, MerchantRef, Transaction};
pub use webhook::Webhook;
