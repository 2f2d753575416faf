//! # Bank-accounting
//! Application reads account operations from input csv file, applies them in order and prints
//! the resulting accounts to output.
//!
//! ## Input format
//! csv with columns `type`, `account`, `owner`, `amount`, `target`, `rate`
//!
//! ```csv
//! type,account,owner,amount,target,rate
//! open,ACC1001,Nguyen Van A,500.00,,
//! open_savings,SAV2001,Nguyen Van A,1000.00,,0.02
//! transfer,SAV2001,,100,ACC1001,
//! ```
//!
//! Rejected operations are logged (see `RUST_LOG`) and skipped.

#![deny(missing_docs)]

use anyhow::Context;
use bank_accounting::{
    csv::{self, RawOperation},
    Bank,
};
use log::{info, warn};
use std::env;
use tokio::{
    io::{stdout, BufReader},
    spawn,
    sync::mpsc::{channel, Receiver, Sender},
};

async fn read_operations_from_file(
    filename: String,
    sender: Sender<RawOperation>,
) -> anyhow::Result<()> {
    let f = tokio::fs::File::open(&filename)
        .await
        .with_context(|| format!("access input file {filename}"))?;

    let bf = BufReader::new(f);
    csv::deserialize_operations_from_csv_reader(bf, sender)
        .await
        .context("improper content of file")
}

// Single owner of the bank, so every operation (transfers included) runs to completion before
// the next one starts.
async fn run_ledger(input: Receiver<RawOperation>) -> Bank {
    let mut input = input;
    let mut bank = Bank::new();
    let mut rejected = 0usize;

    while let Some(op) = input.recv().await {
        if let Err(e) = bank.try_apply_raw_operation(op) {
            warn!("operation skipped: {}", e);
            rejected += 1;
        }
    }

    info!("ledger done, {} operations rejected", rejected);
    bank
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // CLI handle
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        return Err(anyhow::Error::msg("expected exactly one path to csv file"));
    }
    info!("reading operations from {}", args[1]);

    // read data from csv file
    let (tx_raw_ops, rx_raw_ops) = channel(8192);
    let task_read_csv = spawn(read_operations_from_file(args[1].clone(), tx_raw_ops));

    // apply operations in order of appearance
    let task_ledger = spawn(run_ledger(rx_raw_ops));

    // await for each task to complete and handle it errors if occurred
    task_read_csv.await??;
    let bank = task_ledger.await?;

    csv::summarize_accounts(tokio_stream::iter(bank.into_accounts()), stdout())
        .await
        .context("failed to save output")?;

    Ok(())
}
