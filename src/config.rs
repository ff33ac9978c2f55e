//! Run configuration.
//!
//! Defaults reproduce a plain mainnet top-up to 0.33 SOL from
//! `addresses.txt` in the working directory. A YAML file may override any
//! subset of the keys; the binary then layers its command-line flags on top.

use serde::Deserialize;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use std::{fs, path::Path, path::PathBuf};

use crate::error::{Result, TopUpError};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_ADDRESSES_FILE: &str = "addresses.txt";
pub const DEFAULT_MIN_BALANCE_SOL: f64 = 0.33;
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.solana.com";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rpc_url: String,
    /// Relative paths resolve against the working directory.
    pub addresses_file: PathBuf,
    pub min_balance_sol: f64,
    pub explorer_url: String,
    /// Appended as `?cluster=` to explorer links. `None` means mainnet.
    pub explorer_cluster: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            addresses_file: PathBuf::from(DEFAULT_ADDRESSES_FILE),
            min_balance_sol: DEFAULT_MIN_BALANCE_SOL,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            explorer_cluster: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path).map_err(|source| TopUpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(config_str: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(config_str)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(TopUpError::InvalidConfig("rpc_url is empty".to_string()));
        }
        if !self.min_balance_sol.is_finite() || self.min_balance_sol <= 0.0 {
            return Err(TopUpError::InvalidConfig(format!(
                "min_balance_sol must be a positive amount, got {}",
                self.min_balance_sol
            )));
        }
        Ok(())
    }

    /// Minimum balance in lamports, rounded to the nearest lamport.
    pub fn threshold_lamports(&self) -> u64 {
        (self.min_balance_sol * LAMPORTS_PER_SOL as f64).round() as u64
    }
}
