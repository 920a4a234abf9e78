use serde::{Deserialize, Serialize};

use chainsig_primitives::chainhash::Hash;
use chainsig_transaction::Transaction;

/// `tx_index` of a transaction whose position in its block is unknown.
pub const UNKNOWN_TX_INDEX: i64 = -1;

/// `block_height` of an unconfirmed transaction.
pub const UNKNOWN_BLOCK_HEIGHT: i64 = -1;

/// `confirmations` of an unconfirmed transaction.
pub const UNKNOWN_CONFIRMATIONS: i64 = 0;

/// A fetched transaction with the block context a node reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTx {
    /// The transaction itself.
    pub tx: Transaction,
    /// Position of the transaction in its block.
    pub tx_index: i64,
    /// Height of the containing block.
    pub block_height: i64,
    /// Hash of the containing block, `None` while unconfirmed.
    #[serde(default)]
    pub block_hash: Option<Hash>,
    /// Number of confirmations.
    pub confirmations: i64,
}

impl PreparedTx {
    /// A transaction not yet in a block, with every position field unknown.
    pub fn unconfirmed(tx: Transaction) -> Self {
        PreparedTx {
            tx,
            tx_index: UNKNOWN_TX_INDEX,
            block_height: UNKNOWN_BLOCK_HEIGHT,
            block_hash: None,
            confirmations: UNKNOWN_CONFIRMATIONS,
        }
    }

    /// A transaction at `tx_index` of the block `block_hash`.
    pub fn confirmed(
        tx: Transaction,
        tx_index: i64,
        block_height: i64,
        block_hash: Hash,
        confirmations: i64,
    ) -> Self {
        PreparedTx {
            tx,
            tx_index,
            block_height,
            block_hash: Some(block_hash),
            confirmations,
        }
    }

    /// Whether the transaction has been seen in a block.
    pub fn is_confirmed(&self) -> bool {
        self.block_hash.is_some()
    }
}
