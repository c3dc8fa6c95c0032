//! Nimbo Gateway - Nimbocoin wallet integration
//!
//! Deposits are tagged with a payment id and picked up by a periodic scan
//! of recent blocks; withdrawals are sent straight through the wallet.
//!
//! # Modules
//!
//! - [`payment_id`] - Payment id generation and parsing
//! - [`reconciler`] - Deposit reconciliation scan
//! - [`withdrawal`] - Outgoing transfers
//! - [`wallet`] - Wallet JSON-RPC client and the [`WalletApi`] seam
//! - [`config`] - YAML configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod logging;
pub mod payment_id;
pub mod reconciler;
pub mod wallet;
pub mod withdrawal;

// Convenient re-exports at crate root
pub use config::GatewayConfig;
pub use error::{ConfigError, PaymentIdError, WalletError, WithdrawError};
pub use payment_id::{PaymentId, generate_payment_id};
pub use reconciler::{DepositMatches, MatchedDeposit, Reconciler};
pub use wallet::{WalletApi, WalletRpcClient};
pub use withdrawal::WithdrawalIssuer;
