//! Tops up Solana accounts to a minimum balance.
//!
//! ```text
//! addresses.txt (secret;address per line)
//!     → input.rs  (split, per-line decode)
//!     → topup.rs  (balance check, transfer build, fire-and-forget send)
//!     → rpc.rs    (balance, blockhash, send over JSON-RPC)
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod rpc;
pub mod topup;

pub use config::Config;
pub use error::{Result, TopUpError};
pub use topup::{Report, TopUp};
