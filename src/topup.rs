//! The top-up loop.
//!
//! Lines are handled strictly in order. Balance and blockhash lookups are
//! awaited; transfer submissions are spawned and the loop moves on without
//! waiting for them. Once every line is handled the loop collects the
//! spawned submissions so their outcomes end up in the [`Report`].

use futures::future::join_all;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Keypair, signer::Signer, system_instruction,
    transaction::Transaction,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{config::Config, error::Result, input::InputLine, rpc::FundingRpc};

/// Lamports needed to bring `balance` up to `threshold`, if any.
pub fn top_up_amount(balance: u64, threshold: u64) -> Option<u64> {
    (balance < threshold).then(|| threshold - balance)
}

pub fn build_transfer(
    sender: &Keypair,
    recipient: &Pubkey,
    lamports: u64,
    blockhash: Hash,
) -> Transaction {
    Transaction::new_signed_with_payer(
        &[system_instruction::transfer(&sender.pubkey(), recipient, lamports)],
        Some(&sender.pubkey()),
        &[sender],
        blockhash,
    )
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub checked: usize,
    pub sufficient: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Explorer {
    base_url: String,
    cluster: Option<String>,
}

impl Explorer {
    pub fn new(base_url: &str, cluster: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cluster: cluster.map(str::to_string),
        }
    }

    pub fn address_url(&self, address: &Pubkey) -> String {
        self.link("address", &address.to_string())
    }

    pub fn tx_url(&self, signature: &str) -> String {
        self.link("tx", signature)
    }

    fn link(&self, kind: &str, id: &str) -> String {
        match &self.cluster {
            Some(cluster) => format!("{}/{}/{}?cluster={}", self.base_url, kind, id, cluster),
            None => format!("{}/{}/{}", self.base_url, kind, id),
        }
    }
}

pub struct TopUp<R> {
    rpc: Arc<R>,
    threshold: u64,
    explorer: Arc<Explorer>,
}

impl<R: FundingRpc + 'static> TopUp<R> {
    pub fn new(rpc: Arc<R>, config: &Config) -> Self {
        Self {
            rpc,
            threshold: config.threshold_lamports(),
            explorer: Arc::new(Explorer::new(
                &config.explorer_url,
                config.explorer_cluster.as_deref(),
            )),
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Processes every line and returns once all dispatched transfers have
    /// settled. Any error other than a failed send aborts the run.
    pub async fn run(&self, lines: &[InputLine]) -> Result<Report> {
        let mut report = Report::default();
        let mut submissions = vec![];

        for line in lines {
            let record = line.decode()?;
            let balance = self.rpc.get_balance(&record.recipient).await?;
            tracing::info!(line = record.line, recipient = %record.recipient, balance, "Fetched balance");
            report.checked += 1;

            let blockhash = self.rpc.get_latest_blockhash().await?;

            match top_up_amount(balance, self.threshold) {
                Some(lamports) => {
                    let transaction =
                        build_transfer(&record.sender, &record.recipient, lamports, blockhash);
                    tracing::debug!(
                        sender = %record.sender.pubkey(),
                        recipient = %record.recipient,
                        lamports,
                        "Dispatching top-up transfer"
                    );
                    submissions.push(self.dispatch(
                        transaction,
                        record.sender.pubkey(),
                        record.recipient,
                        lamports,
                    ));
                }
                None => {
                    tracing::info!(recipient = %record.recipient, balance, "Balance sufficient");
                    report.sufficient += 1;
                }
            }
        }

        for outcome in join_all(submissions).await {
            match outcome {
                Ok(true) => report.sent += 1,
                Ok(false) => report.failed += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Top-up submission task panicked");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    fn dispatch(
        &self,
        transaction: Transaction,
        sender: Pubkey,
        recipient: Pubkey,
        lamports: u64,
    ) -> JoinHandle<bool> {
        let rpc = Arc::clone(&self.rpc);
        let explorer = Arc::clone(&self.explorer);
        tokio::spawn(async move {
            match rpc.send_transaction(&transaction).await {
                Ok(signature) => {
                    let signature = signature.to_string();
                    tracing::info!(
                        %sender,
                        %recipient,
                        lamports,
                        %signature,
                        sender_url = %explorer.address_url(&sender),
                        recipient_url = %explorer.address_url(&recipient),
                        tx_url = %explorer.tx_url(&signature),
                        "Top-up transaction sent"
                    );
                    true
                }
                Err(e) => {
                    tracing::error!(
                        %sender,
                        %recipient,
                        lamports,
                        error = %e,
                        "Failed to send top-up transaction"
                    );
                    false
                }
            }
        })
    }
}
