//! In-memory wallet for unit tests. Counts every call and records the
//! params it was given.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::WalletApi;
use super::types::{
    Block, GetTransactionsParams, SendTransactionParams, SendTransactionResult, Transaction,
    WalletStatus,
};
use crate::error::WalletError;

#[derive(Default)]
pub(crate) struct StubWallet {
    pub height: u64,
    pub blocks: Vec<Block>,
    /// When set, `sendTransaction` fails with this code/message
    pub send_error: Option<(i64, String)>,
    pub status_calls: AtomicUsize,
    pub transactions_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub last_range: Mutex<Option<GetTransactionsParams>>,
    pub last_send: Mutex<Option<SendTransactionParams>>,
}

impl StubWallet {
    pub fn new(height: u64, blocks: Vec<Block>) -> Self {
        Self {
            height,
            blocks,
            ..Self::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
            + self.transactions_calls.load(Ordering::SeqCst)
            + self.send_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn tx(payment_id: &str, amount: i64, block_index: u64, timestamp: u64) -> Transaction {
    Transaction {
        payment_id: Some(payment_id.to_string()),
        amount,
        block_index,
        timestamp,
        transaction_hash: None,
    }
}

pub(crate) fn block(transactions: Vec<Transaction>) -> Block {
    Block {
        block_hash: None,
        block_index: None,
        transactions: Some(transactions),
    }
}

#[async_trait]
impl WalletApi for StubWallet {
    async fn get_status(&self) -> Result<WalletStatus, WalletError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(WalletStatus {
            block_count: self.height,
            known_block_count: None,
            last_block_hash: None,
            peer_count: None,
        })
    }

    async fn get_transactions(
        &self,
        params: GetTransactionsParams,
    ) -> Result<Vec<Block>, WalletError> {
        self.transactions_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().unwrap() = Some(params);
        Ok(self.blocks.clone())
    }

    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, WalletError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_send.lock().unwrap() = Some(params.clone());
        match &self.send_error {
            Some((code, message)) => Err(WalletError::Rpc {
                code: *code,
                message: message.clone(),
            }),
            None => Ok(SendTransactionResult {
                transaction_hash:
                    "45766da328af0ece4aed705b96e6fb9ae3dff509fa33653c0a3195502c184f04"
                        .to_string(),
            }),
        }
    }
}
