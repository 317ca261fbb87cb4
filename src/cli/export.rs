use super::session;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use indicatif::ProgressStyle;
use monzo_client::config::Config;
use monzo_client::models::{Account, Currency, Transaction};
use anyhow::{Context, Result};
use monzo_client::{MonzoOperations, Pagination};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{Span, info, instrument};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const PAGE_SIZE: u32 = 100;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export transactions created on or after this date
    #[arg(long)]
    since: NaiveDate,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub async fn execute(args: &ExportArgs) -> Result<()> {
    let since = args
        .since
        .and_hms_opt(0, 0, 0)
        .context("Invalid --since date")?
        .and_utc();

    let config = Config::load()?;
    let client = session::authenticated_client(&config).await?;
    let rows = collect_rows(&client, since, PAGE_SIZE).await?;

    match &args.output {
        Some(path) => write_rows(&rows, File::create(path)?)?,
        None => write_rows(&rows, io::stdout().lock())?,
    }

    info!(rows = rows.len(), "Export completed");

    Ok(())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ExportRow {
    pub created: DateTime<Utc>,
    pub account: String,
    pub description: String,
    pub merchant: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(rename = "ID")]
    pub id: String,
}

impl ExportRow {
    fn new(account: &Account, tx: &Transaction) -> Self {
        ExportRow {
            created: tx.created,
            account: account.description.clone(),
            description: tx.description.clone(),
            merchant: tx.merchant_name().unwrap_or_default().to_string(),
            category: tx.category.clone(),
            amount: tx.currency.to_major_units(tx.amount),
            currency: tx.currency,
            id: tx.id.to_string(),
        }
    }
}

#[instrument(name = "Exporting transactions", skip_all)]
pub(crate) async fn collect_rows<M: MonzoOperations + Sync>(
    client: &M,
    since: DateTime<Utc>,
    page_size: u32,
) -> Result<Vec<ExportRow>> {
    let span = Span::current();
    span.pb_set_style(
        &ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
        )?,
    );
    span.pb_set_message("Exporting accounts");

    let accounts: Vec<Account> = client
        .accounts(None, &Pagination::default())
        .await?
        .into_iter()
        .filter(|account| !account.closed)
        .collect();

    span.pb_set_length(accounts.len() as u64);
    let mut rows = Vec::new();
    for account in &accounts {
        rows.extend(export_account(client, account, since, page_size).await?);
        span.pb_inc(1);
    }

    rows.sort_by_key(|row| row.created);
    Ok(rows)
}

#[instrument(name = "Exporting account", skip_all, fields(account = %account.description))]
async fn export_account<M: MonzoOperations + Sync>(
    client: &M,
    account: &Account,
    since: DateTime<Utc>,
    page_size: u32,
) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::new();
    let mut pagination = Pagination::default().limit(page_size).since(since);

    // Walk forward page by page, continuing after the last transaction seen
    loop {
        let page = client
            .transactions(&account.id, &pagination, true)
            .await?;

        rows.extend(
            page.iter()
                .filter(|tx| !tx.is_declined())
                .map(|tx| ExportRow::new(account, tx)),
        );

        match page.last() {
            Some(last) if page.len() as u32 >= page_size => {
                pagination = pagination.since(last.id.clone());
            }
            _ => break,
        }
    }

    info!(rows = rows.len(), "Account exported");
    Ok(rows)
}

pub(crate) fn write_rows<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::mocks::{MockMonzoClient, mock_account, mock_transaction};
    use super::*;
    use chrono::TimeZone;
    use monzo_client::Since;
    use monzo_client::id::TransactionId;
    use rust_decimal::prelude::dec;

    fn since() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_collect_rows_follows_pages() {
        let account = mock_account("acc_1", "Current", false);
        let client = MockMonzoClient::new(
            vec![account],
            vec![
                vec![
                    mock_transaction("tx_1", "acc_1", -510, "2025-01-02T10:00:00Z", false),
                    mock_transaction("tx_2", "acc_1", -250, "2025-01-03T10:00:00Z", false),
                ],
                vec![mock_transaction("tx_3", "acc_1", 1000, "2025-01-04T10:00:00Z", false)],
            ],
        );

        let rows = collect_rows(&client, since(), 2).await.unwrap();
        assert_eq!(rows.len(), 3);

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1.since, Some(Since::Time(since())));
        assert_eq!(
            requests[1].1.since,
            Some(Since::Transaction(TransactionId::new_unchecked("tx_2")))
        );
        assert_eq!(requests[1].1.limit, Some(2));
    }

    #[tokio::test]
    async fn test_collect_rows_skips_closed_accounts_and_declines() {
        let client = MockMonzoClient::new(
            vec![
                mock_account("acc_closed", "Old", true),
                mock_account("acc_1", "Current", false),
            ],
            vec![vec![
                mock_transaction("tx_1", "acc_1", -510, "2025-01-02T10:00:00Z", false),
                mock_transaction("tx_2", "acc_1", -9900, "2025-01-03T10:00:00Z", true),
            ]],
        );

        let rows = collect_rows(&client, since(), 100).await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "acc_1");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "tx_1");
        assert_eq!(rows[0].account, "Current");
        assert_eq!(rows[0].merchant, "Corner Shop");
        assert_eq!(rows[0].amount, dec!(-5.10));
    }

    #[tokio::test]
    async fn test_collect_rows_sorts_across_accounts() {
        let client = MockMonzoClient::new(
            vec![
                mock_account("acc_1", "Current", false),
                mock_account("acc_2", "Joint", false),
            ],
            vec![
                vec![mock_transaction("tx_late", "acc_1", -100, "2025-02-01T10:00:00Z", false)],
                vec![mock_transaction("tx_early", "acc_2", -100, "2025-01-05T10:00:00Z", false)],
            ],
        );

        let rows = collect_rows(&client, since(), 100).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["tx_early", "tx_late"]);
    }

    #[test]
    fn test_write_rows() {
        let account = mock_account("acc_1", "Current", false);
        let tx = mock_transaction("tx_1", "acc_1", -510, "2025-01-02T10:00:00Z", false);
        let rows = vec![ExportRow::new(&account, &tx)];

        let mut buf = Vec::new();
        write_rows(&rows, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("Created,Account,Description,Merchant,Category,Amount,Currency,ID")
        );
        assert_eq!(
            lines.next(),
            Some("2025-01-02T10:00:00Z,Current,Purchase tx_1,Corner Shop,groceries,-5.10,GBP,tx_1")
        );
        assert_eq!(lines.next(), None);
    }
}
