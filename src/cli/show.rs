use super::session;
use chrono::NaiveDate;
use clap::Subcommand;
use monzo_client::config::Config;
use monzo_client::id::AccountId;
use anyhow::{Context, Result};
use monzo_client::{MonzoOperations, Pagination};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration and cache paths
    Paths,
    /// Show who the cached token belongs to
    Whoami,
    /// List accounts
    Accounts,
    /// Show the balance of an account
    Balance { account_id: AccountId },
    /// List the pots of an account
    Pots { account_id: AccountId },
    /// List recent transactions of an account
    Transactions {
        account_id: AccountId,
        /// Only transactions created on or after this date
        #[arg(long)]
        since: Option<NaiveDate>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// List webhooks registered on an account
    Webhooks { account_id: AccountId },
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
            resource => {
                let config = Config::load()?;
                let client = session::authenticated_client(&config).await?;
                resource.show(&client).await
            }
        }
    }

    async fn show<M: MonzoOperations + Sync>(&self, client: &M) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths()?,
            ShowResource::Whoami => {
                let whoami = client.whoami().await?;
                info!(user_id = %whoami.user_id, client_id = %whoami.client_id, "Authenticated");
            }
            ShowResource::Accounts => {
                for account in client.accounts(None, &Pagination::default()).await? {
                    info!(
                        id = %account.id,
                        kind = account.account_type.as_str(),
                        closed = account.closed,
                        "{}",
                        account.description
                    );
                }
            }
            ShowResource::Balance { account_id } => {
                let balance = client.balance(account_id).await?;
                info!(
                    balance = %balance.currency.to_major_units(balance.balance),
                    total = %balance.currency.to_major_units(balance.total_balance),
                    spent_today = %balance.currency.to_major_units(balance.spend_today),
                    currency = ?balance.currency,
                    "Balance"
                );
            }
            ShowResource::Pots { account_id } => {
                for pot in client.pots(account_id).await? {
                    if pot.deleted {
                        continue;
                    }
                    info!(
                        id = %pot.id,
                        balance = %pot.currency.to_major_units(pot.balance),
                        "{}",
                        pot.name
                    );
                }
            }
            ShowResource::Transactions {
                account_id,
                since,
                limit,
            } => {
                let mut pagination = Pagination::default().limit(*limit);
                if let Some(since) = since {
                    let since = since
                        .and_hms_opt(0, 0, 0)
                        .context("Invalid --since date")?
                        .and_utc();
                    pagination = pagination.since(since);
                }

                for tx in client.transactions(account_id, &pagination, true).await? {
                    info!(
                        id = %tx.id,
                        created = %tx.created,
                        amount = %tx.currency.to_major_units(tx.amount),
                        merchant = tx.merchant_name().unwrap_or_default(),
                        "{}",
                        tx.description
                    );
                }
            }
            ShowResource::Webhooks { account_id } => {
                for webhook in client.webhooks(account_id).await? {
                    info!(id = %webhook.id, "{}", webhook.url);
                }
            }
        }

        Ok(())
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;
    let cache_dir = Config::cache_dir()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?cache_dir, "Cache path");

    Ok(())
}
