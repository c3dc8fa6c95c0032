//! Outgoing transfers
//!
//! Amounts are validated locally, converted to minor units and sent with a
//! fixed fee and zero anonymity. Wallet-side errors are passed through.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use crate::config::WithdrawalConfig;
use crate::error::WithdrawError;
use crate::reconciler::MINOR_UNITS_SCALE;
use crate::wallet::{SendTransactionParams, SendTransactionResult, Transfer, WalletApi};

/// Mixin count sent with every transfer
pub const WITHDRAWAL_ANONYMITY: u32 = 0;

/// Convert a display amount to minor units, truncating extra decimals.
pub fn display_to_minor(amount: Decimal) -> Result<u64, WithdrawError> {
    if amount <= Decimal::ZERO {
        return Err(WithdrawError::InvalidAmount {
            amount,
            reason: "amount must be greater than 0".to_string(),
        });
    }

    let minor = amount
        .checked_mul(Decimal::from(10u64.pow(MINOR_UNITS_SCALE)))
        .and_then(|scaled| scaled.trunc().to_u64())
        .ok_or_else(|| WithdrawError::InvalidAmount {
            amount,
            reason: "amount out of range".to_string(),
        })?;

    if minor == 0 {
        return Err(WithdrawError::InvalidAmount {
            amount,
            reason: "amount is below the smallest unit".to_string(),
        });
    }
    Ok(minor)
}

/// Sends withdrawals through the wallet
pub struct WithdrawalIssuer<W> {
    wallet: W,
    fee: u64,
}

impl<W: WalletApi> WithdrawalIssuer<W> {
    pub fn new(wallet: W, config: &WithdrawalConfig) -> Self {
        Self {
            wallet,
            fee: config.fee,
        }
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Send `amount` (display units) to `address`.
    ///
    /// Not idempotent: two calls with the same arguments are two transfers.
    /// The address is not validated; the wallet rejects bad ones.
    pub async fn withdraw(
        &self,
        address: &str,
        amount: Decimal,
    ) -> Result<SendTransactionResult, WithdrawError> {
        let minor = match display_to_minor(amount) {
            Ok(minor) => minor,
            Err(e) => {
                warn!("Rejected withdrawal to {}: {}", address, e);
                return Err(e);
            }
        };

        let params = SendTransactionParams {
            anonymity: WITHDRAWAL_ANONYMITY,
            fee: self.fee,
            transfers: vec![Transfer {
                amount: minor,
                address: address.to_string(),
            }],
        };

        let result = self.wallet.send_transaction(&params).await?;
        info!(
            "Withdrawal of {} to {} sent in tx {}",
            amount, address, result.transaction_hash
        );
        Ok(result)
    }
}
