//! Wire types for the wallet JSON-RPC API

use serde::{Deserialize, Serialize};

/// `getStatus` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatus {
    pub block_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_block_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_count: Option<u32>,
}

/// `getTransactions` params
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionsParams {
    pub first_block_index: u64,
    pub block_count: u64,
}

/// `getTransactions` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub items: Vec<Block>,
}

/// A block as reported by `getTransactions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_index: Option<u64>,
    /// The wallet may send `null` for blocks without wallet transactions
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
}

impl Block {
    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_deref().unwrap_or_default()
    }

    /// Block index, falling back to the index carried by its transactions
    pub fn index(&self) -> Option<u64> {
        self.block_index
            .or_else(|| self.transactions().first().map(|tx| tx.block_index))
    }
}

/// A wallet transaction. `amount` is in minor units and negative for
/// outgoing transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Absent and `""` both mean the transfer carried no payment id
    #[serde(default)]
    pub payment_id: Option<String>,
    pub amount: i64,
    pub block_index: u64,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl Transaction {
    /// Payment id if the wallet reported a non-empty one
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A single destination of `sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub amount: u64,
    pub address: String,
}

/// `sendTransaction` params
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionParams {
    pub anonymity: u32,
    pub fee: u64,
    pub transfers: Vec<Transfer>,
}

/// `sendTransaction` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResult {
    pub transaction_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_payment_id_semantics() {
        let absent: Transaction = serde_json::from_value(serde_json::json!({
            "amount": 100, "blockIndex": 1, "timestamp": 10
        }))
        .unwrap();
        assert_eq!(absent.payment_id, None);
        assert_eq!(absent.payment_id(), None);

        let empty: Transaction = serde_json::from_value(serde_json::json!({
            "paymentId": "", "amount": 100, "blockIndex": 1, "timestamp": 10
        }))
        .unwrap();
        assert_eq!(empty.payment_id, Some(String::new()));
        assert_eq!(empty.payment_id(), None);

        let present: Transaction = serde_json::from_value(serde_json::json!({
            "paymentId": "abcd", "amount": 100, "blockIndex": 1, "timestamp": 10
        }))
        .unwrap();
        assert_eq!(present.payment_id(), Some("abcd"));
    }

    #[test]
    fn test_transactions_page_requires_items() {
        let missing = serde_json::from_value::<TransactionsPage>(serde_json::json!({}));
        assert!(missing.is_err());

        let empty: TransactionsPage =
            serde_json::from_value(serde_json::json!({"items": []})).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_block_null_transactions() {
        let block: Block = serde_json::from_value(serde_json::json!({
            "blockHash": "ff00",
            "transactions": null
        }))
        .unwrap();
        assert!(block.transactions().is_empty());
        assert_eq!(block.index(), None);
    }

    #[test]
    fn test_block_index_from_transactions() {
        let block: Block = serde_json::from_value(serde_json::json!({
            "transactions": [
                {"paymentId": "", "amount": -500, "blockIndex": 77, "timestamp": 1}
            ]
        }))
        .unwrap();
        assert_eq!(block.index(), Some(77));
        assert_eq!(block.transactions()[0].amount, -500);
    }

    #[test]
    fn test_send_params_wire_shape() {
        let params = SendTransactionParams {
            anonymity: 0,
            fee: 5000,
            transfers: vec![Transfer {
                amount: 1000,
                address: "NIMBaddr".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "anonymity": 0,
                "fee": 5000,
                "transfers": [{"amount": 1000, "address": "NIMBaddr"}]
            })
        );
    }
}
