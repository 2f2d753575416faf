//! csv input/output format and functions

use csv_async::{AsyncWriterBuilder, Terminator};
use rust_decimal::Decimal;

use crate::{account::Account, AccountNumber};
use serde::{Deserialize, Serialize};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::Sender,
};
use tokio_stream::{Stream, StreamExt};

// Allowed operation types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RawOperationType {
    Open,
    OpenSavings,
    Deposit,
    Withdraw,
    Transfer,
    Interest,
    ResetPeriod,
}

/// Single row of operations file: `type,account,owner,amount,target,rate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawOperation {
    pub r#type: RawOperationType,
    pub account: AccountNumber,
    pub owner: Option<String>,
    pub amount: Option<Decimal>,
    pub target: Option<AccountNumber>,
    pub rate: Option<Decimal>,
}

/// take a reader and continuously deserialize operations from it into `sender`
pub async fn deserialize_operations_from_csv_reader<'r, R: AsyncRead + Unpin + Send + 'r>(
    input: R,
    sender: Sender<RawOperation>,
) -> anyhow::Result<()> {
    let mut builder = csv_async::AsyncReaderBuilder::new();
    builder.trim(csv_async::Trim::All);

    let mut rdr = builder.create_deserializer(input);

    let _headers = rdr.headers().await?;

    let mut records = rdr.deserialize::<RawOperation>();
    while let Some(record) = records.next().await {
        let record: RawOperation = record?;
        sender.send(record).await?;
    }

    Ok(())
}

/// summary of a single account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub account: AccountNumber,
    owner: String,
    kind: String,
    balance: Decimal,
    entries: usize,
}

impl<T: Account> From<T> for AccountSummary {
    fn from(oth: T) -> Self {
        let rp = 2; // round precision
        Self {
            account: oth.number().to_owned(),
            owner: oth.owner().to_owned(),
            kind: oth.kind().to_owned(),
            balance: oth.balance().round_dp(rp),
            entries: oth.history().len(),
        }
    }
}

/// read accounts from `in_stream` and save them as [`AccountSummary`] into `wr`. Headers will be
/// included automatically. Terminator is `\r\n`.
pub async fn summarize_accounts(
    in_stream: impl Stream<Item = impl Account> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(acc) = in_stream.next().await {
        let acc_summary = AccountSummary::from(acc);
        wr.serialize(acc_summary).await?;
    }

    wr.flush().await?;
    Ok(())
}
