//! Deposit reconciliation
//!
//! Called periodically (typically from cron) with the payment ids the
//! application is still waiting on. Fetches the trailing block window from
//! the wallet in one request and reports which awaited ids showed up.
//!
//! The awaiting set is never modified here: the caller marks matched ids as
//! complete and keeps the rest for the next pass.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ScanningConfig;
use crate::error::WalletError;
use crate::payment_id::PaymentId;
use crate::wallet::{Block, GetTransactionsParams, Transaction, WalletApi};

/// Minor units per display unit
pub const MINOR_UNITS_SCALE: u32 = 2;

/// Deposit found for an awaited payment id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedDeposit {
    pub payment_id: PaymentId,
    /// Display units (minor units / 100), a JSON number on the wire
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub block_index: u64,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl MatchedDeposit {
    fn from_transaction(payment_id: PaymentId, tx: &Transaction) -> Self {
        Self {
            payment_id,
            amount: minor_to_display(tx.amount),
            block_index: tx.block_index,
            timestamp: tx.timestamp,
            transaction_hash: tx.transaction_hash.clone(),
        }
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

pub type DepositMatches = HashMap<PaymentId, MatchedDeposit>;

pub fn minor_to_display(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNITS_SCALE)
}

/// Block range to fetch for a chain of `height` blocks, clamped at block 0.
/// `None` when the range is empty.
pub fn scan_range(height: u64, window: u64) -> Option<GetTransactionsParams> {
    let first_block_index = height.saturating_sub(window);
    let block_count = height - first_block_index;
    (block_count > 0).then_some(GetTransactionsParams {
        first_block_index,
        block_count,
    })
}

/// Match awaited ids against every transaction of every block.
///
/// Later transactions overwrite earlier ones for the same id.
pub fn match_deposits(awaiting: &HashSet<PaymentId>, blocks: &[Block]) -> DepositMatches {
    let mut matches = DepositMatches::new();

    for block in blocks {
        debug!(
            block_index = ?block.index(),
            transactions = block.transactions().len(),
            "checking block"
        );

        for tx in block.transactions() {
            let Some(raw) = tx.payment_id() else {
                continue;
            };
            let Ok(payment_id) = raw.parse::<PaymentId>() else {
                continue;
            };
            if !awaiting.contains(&payment_id) {
                continue;
            }

            let deposit = MatchedDeposit::from_transaction(payment_id.clone(), tx);
            info!(
                "Matched deposit {} for payment id {} at block {}",
                deposit.amount, payment_id, deposit.block_index
            );
            matches.insert(payment_id, deposit);
        }
    }

    matches
}

/// Scans the wallet for awaited deposits
pub struct Reconciler<W> {
    wallet: W,
    block_window: u64,
}

impl<W: WalletApi> Reconciler<W> {
    pub fn new(wallet: W, config: &ScanningConfig) -> Self {
        Self {
            wallet,
            block_window: config.block_window,
        }
    }

    pub fn block_window(&self) -> u64 {
        self.block_window
    }

    /// Current block count reported by the wallet.
    ///
    /// A missing `blockCount` is an error; there is no fallback height.
    pub async fn current_height(&self) -> Result<u64, WalletError> {
        let status = self.wallet.get_status().await?;
        Ok(status.block_count)
    }

    /// Scan the trailing `window` blocks (configured default when `None`).
    ///
    /// Returns immediately, without touching the wallet, if nothing is awaited.
    pub async fn scan(
        &self,
        awaiting: &HashSet<PaymentId>,
        window: Option<u64>,
    ) -> Result<DepositMatches, WalletError> {
        if awaiting.is_empty() {
            return Ok(DepositMatches::new());
        }

        let height = self.current_height().await?;
        self.scan_at_height(awaiting, window, height).await
    }

    /// [`Reconciler::scan`] with a forced chain height instead of `getStatus`.
    pub async fn scan_at_height(
        &self,
        awaiting: &HashSet<PaymentId>,
        window: Option<u64>,
        height: u64,
    ) -> Result<DepositMatches, WalletError> {
        if awaiting.is_empty() {
            return Ok(DepositMatches::new());
        }

        let window = window.unwrap_or(self.block_window);
        let Some(range) = scan_range(height, window) else {
            debug!(height, "empty chain, nothing to scan");
            return Ok(DepositMatches::new());
        };

        debug!(
            first_block_index = range.first_block_index,
            block_count = range.block_count,
            awaiting = awaiting.len(),
            "scanning block window"
        );

        let blocks = self.wallet.get_transactions(range).await?;
        let matches = match_deposits(awaiting, &blocks);

        info!(
            "Scan of blocks {}..{} matched {}/{} awaiting deposits",
            range.first_block_index,
            height,
            matches.len(),
            awaiting.len()
        );

        Ok(matches)
    }
}
