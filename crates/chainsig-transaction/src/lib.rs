//! Transactions and their signature digests.
//!
//! Provides the `Transaction` type with its wire serialization, and the
//! digest engine computing what an input's signature commits to under
//! either the legacy algorithm or the fork-id (BIP143-style) algorithm.

pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;

mod error;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use sighash::{BaseMode, SigHashes, SighashCache, SighashFlags};

#[cfg(test)]
mod tests;
