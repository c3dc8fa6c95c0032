//! Wallet daemon access
//!
//! [`WalletApi`] is the seam between the reconciliation/withdrawal logic and
//! the transport. [`WalletRpcClient`] is the production implementation.

pub mod rpc;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WalletError;

pub use rpc::WalletRpcClient;
pub use types::{
    Block, GetTransactionsParams, SendTransactionParams, SendTransactionResult, Transaction,
    TransactionsPage, Transfer, WalletStatus,
};

/// Operations the gateway needs from a wallet daemon
#[async_trait]
pub trait WalletApi: Send + Sync {
    /// `getStatus`
    async fn get_status(&self) -> Result<WalletStatus, WalletError>;

    /// `getTransactions` over a block range, one request
    async fn get_transactions(
        &self,
        params: GetTransactionsParams,
    ) -> Result<Vec<Block>, WalletError>;

    /// `sendTransaction`
    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, WalletError>;
}

#[async_trait]
impl<W: WalletApi + ?Sized> WalletApi for Arc<W> {
    async fn get_status(&self) -> Result<WalletStatus, WalletError> {
        (**self).get_status().await
    }

    async fn get_transactions(
        &self,
        params: GetTransactionsParams,
    ) -> Result<Vec<Block>, WalletError> {
        (**self).get_transactions(params).await
    }

    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, WalletError> {
        (**self).send_transaction(params).await
    }
}
