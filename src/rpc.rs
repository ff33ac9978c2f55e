//! The three RPC calls the top-up loop needs.
//!
//! `FundingRpc` is implemented for the nonblocking `RpcClient`; tests swap in
//! an in-memory double.

use async_trait::async_trait;
use solana_client::{
    client_error::ClientError, nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

#[async_trait]
pub trait FundingRpc: Send + Sync {
    /// Current balance in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, ClientError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError>;

    /// Submits without waiting for confirmation.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError>;
}

pub fn connect(rpc_url: &str) -> RpcClient {
    RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed())
}

#[async_trait]
impl FundingRpc for RpcClient {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, ClientError> {
        RpcClient::get_balance(self, address).await
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError> {
        RpcClient::get_latest_blockhash(self).await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            ..RpcSendTransactionConfig::default()
        };
        self.send_transaction_with_config(transaction, config).await
    }
}
