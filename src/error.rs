use std::path::PathBuf;

use solana_client::client_error::ClientError;
use solana_sdk::pubkey::ParsePubkeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopUpError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("line {line}: expected `secret;address`, no ';' found")]
    MissingSeparator { line: usize },

    #[error("line {line}: secret is not valid base64: {source}")]
    SecretEncoding {
        line: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error("line {line}: secret is not a valid keypair: {reason}")]
    InvalidKeypair { line: usize, reason: String },

    #[error("line {line}: invalid recipient address {address:?}: {source}")]
    InvalidAddress {
        line: usize,
        address: String,
        #[source]
        source: ParsePubkeyError,
    },

    #[error("RPC error: {0}")]
    Rpc(#[from] Box<ClientError>),
}

impl From<ClientError> for TopUpError {
    fn from(err: ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, TopUpError>;
