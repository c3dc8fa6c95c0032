use rust_decimal::Decimal;
use thiserror::Error;

/// Failures talking to the wallet daemon.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Wallet connection failed: {0}")]
    Connection(String),

    #[error("Malformed wallet response: {0}")]
    MalformedResponse(String),

    /// Error envelope returned by the wallet itself, passed through as-is.
    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

#[derive(Debug, Error)]
pub enum WithdrawError {
    #[error("Invalid withdrawal amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: String },

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentIdError {
    #[error("Payment id source is {bytes} bytes, hex encoding exceeds 64 characters")]
    TooLong { bytes: usize },

    #[error("Invalid payment id {0:?}: expected 64 hex characters")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(String),
}
