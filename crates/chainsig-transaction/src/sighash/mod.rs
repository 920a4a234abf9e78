//! Signature digests for transaction inputs.
//!
//! Computes the 32-byte value an input's signature commits to. Bitcoin
//! uses the legacy whole-transaction algorithm; Bitcoin Cash uses the
//! BIP143-style algorithm with the fork-id bit folded into the flag word.
//!
//! See <https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/replay-protected-sighash.md>

mod flags;
mod forkid;
mod legacy;

pub use flags::{
    BaseMode, SighashFlags, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_FORKID, SIGHASH_MASK,
    SIGHASH_NONE, SIGHASH_SINGLE,
};
pub use forkid::SigHashes;
pub use legacy::SINGLE_OUT_OF_RANGE_DIGEST;

use chainsig_primitives::hash::sha256d;
use chainsig_script::{Chain, Script};
use tracing::{debug, error};

use crate::transaction::Transaction;
use crate::TransactionError;

fn check_index(tx: &Transaction, input_index: usize) -> Result<(), TransactionError> {
    if input_index < tx.inputs.len() {
        return Ok(());
    }
    error!(
        input_index,
        inputs = tx.inputs.len(),
        "signature digest requested for missing input"
    );
    Err(TransactionError::InvalidInputIndex {
        index: input_index,
        inputs: tx.inputs.len(),
    })
}

// -----------------------------------------------------------------------
// SighashCache
// -----------------------------------------------------------------------

/// A transaction together with its fork-id midstates.
///
/// Build one per transaction and reuse it for every input; the midstates
/// belong to the borrowed transaction and are never shared with another.
pub struct SighashCache<'a> {
    tx: &'a Transaction,
    hashes: SigHashes,
}

impl<'a> SighashCache<'a> {
    pub fn new(tx: &'a Transaction) -> Self {
        SighashCache {
            tx,
            hashes: SigHashes::new(tx),
        }
    }

    pub fn transaction(&self) -> &'a Transaction {
        self.tx
    }

    pub fn hashes(&self) -> &SigHashes {
        &self.hashes
    }

    /// The fork-id pre-image for `input_index`, before double hashing.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `script_code` - Script code substituted for the input's script.
    /// * `flags`       - Base mode and ANYONECANPAY; the fork-id bit is added here.
    /// * `value`       - Value of the output being spent.
    pub fn fork_id_preimage(
        &self,
        input_index: usize,
        script_code: &Script,
        flags: SighashFlags,
        value: i64,
    ) -> Result<Vec<u8>, TransactionError> {
        check_index(self.tx, input_index)?;
        Ok(forkid::preimage(
            self.tx,
            &self.hashes,
            input_index,
            script_code.to_bytes(),
            value,
            flags,
            flags.with_fork_id(),
        ))
    }

    /// The fork-id digest for `input_index`.
    pub fn fork_id_digest(
        &self,
        input_index: usize,
        script_code: &Script,
        flags: SighashFlags,
        value: i64,
    ) -> Result<[u8; 32], TransactionError> {
        let preimage = self.fork_id_preimage(input_index, script_code, flags, value)?;
        Ok(sha256d(&preimage))
    }

    /// The legacy digest for `input_index`.
    pub fn legacy_digest(
        &self,
        input_index: usize,
        script_code: &Script,
        flags: SighashFlags,
    ) -> Result<[u8; 32], TransactionError> {
        legacy_signature_hash(self.tx, input_index, script_code, flags)
    }

    /// The digest for `input_index` under `chain`'s algorithm.
    ///
    /// `value` is only committed to on fork-id chains.
    pub fn signature_hash(
        &self,
        input_index: usize,
        script_code: &Script,
        flags: SighashFlags,
        chain: Chain,
        value: i64,
    ) -> Result<[u8; 32], TransactionError> {
        debug!(input_index, %flags, %chain, "computing signature digest");
        if chain.uses_fork_id() {
            self.fork_id_digest(input_index, script_code, flags, value)
        } else {
            self.legacy_digest(input_index, script_code, flags)
        }
    }
}

// -----------------------------------------------------------------------
// One-shot functions
// -----------------------------------------------------------------------

/// Compute the digest for one input under `chain`'s algorithm.
///
/// For several inputs of the same transaction, a `SighashCache` avoids
/// recomputing the fork-id midstates.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: SighashFlags,
    chain: Chain,
    value: i64,
) -> Result<[u8; 32], TransactionError> {
    if chain.uses_fork_id() {
        check_index(tx, input_index)?;
        SighashCache::new(tx).signature_hash(input_index, script_code, flags, chain, value)
    } else {
        debug!(input_index, %flags, %chain, "computing signature digest");
        legacy_signature_hash(tx, input_index, script_code, flags)
    }
}

/// Compute the fork-id pre-image bytes for one input.
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: SighashFlags,
    value: i64,
) -> Result<Vec<u8>, TransactionError> {
    check_index(tx, input_index)?;
    SighashCache::new(tx).fork_id_preimage(input_index, script_code, flags, value)
}

/// Compute the legacy digest for one input.
///
/// Fails with a script error if the script code does not parse.
pub fn legacy_signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: SighashFlags,
) -> Result<[u8; 32], TransactionError> {
    check_index(tx, input_index)?;
    legacy::digest(tx, input_index, script_code, flags)
}

/// BIP143 pre-image with an arbitrary flag word, as used by segwit v0.
#[cfg(test)]
pub(crate) fn bip143_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: SighashFlags,
    value: i64,
) -> Vec<u8> {
    forkid::preimage(
        tx,
        &SigHashes::new(tx),
        input_index,
        script_code.to_bytes(),
        value,
        flags,
        flags.to_u32(),
    )
}
