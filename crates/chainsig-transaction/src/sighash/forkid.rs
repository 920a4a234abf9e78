//! Fork-id (BIP143-style) digest.
//!
//! The pre-image commits to three transaction-wide midstates instead of
//! re-serializing the transaction per input, and to the value of the
//! output being spent.

use chainsig_primitives::hash::sha256d;
use chainsig_primitives::util::WireWriter;

use super::flags::{BaseMode, SighashFlags};
use crate::transaction::Transaction;

const ZERO_HASH: [u8; 32] = [0u8; 32];

/// Transaction-wide midstates, computed once and shared by every input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigHashes {
    /// Double SHA-256 of every input's outpoint.
    pub hash_prevouts: [u8; 32],
    /// Double SHA-256 of every input's sequence number.
    pub hash_sequence: [u8; 32],
    /// Double SHA-256 of every serialized output.
    pub hash_outputs: [u8; 32],
}

impl SigHashes {
    pub fn new(tx: &Transaction) -> Self {
        let mut prevouts = WireWriter::with_capacity(tx.inputs.len() * 36);
        let mut sequences = WireWriter::with_capacity(tx.inputs.len() * 4);
        for input in &tx.inputs {
            input.write_outpoint(&mut prevouts);
            sequences.write_u32_le(input.sequence_number);
        }

        let mut outputs = WireWriter::new();
        for output in &tx.outputs {
            output.write_to(&mut outputs);
        }

        SigHashes {
            hash_prevouts: sha256d(prevouts.as_bytes()),
            hash_sequence: sha256d(sequences.as_bytes()),
            hash_outputs: sha256d(outputs.as_bytes()),
        }
    }
}

/// Build the pre-image for `input_index`, ending with `flag_word`.
///
/// The caller has checked the index. `flags` selects which midstates are
/// committed; `flag_word` is written verbatim.
pub(crate) fn preimage(
    tx: &Transaction,
    hashes: &SigHashes,
    input_index: usize,
    script_code: &[u8],
    value: i64,
    flags: SighashFlags,
    flag_word: u32,
) -> Vec<u8> {
    let input = &tx.inputs[input_index];
    let single_or_none = matches!(flags.base, BaseMode::Single | BaseMode::None);

    let hash_prevouts = if flags.anyone_can_pay {
        ZERO_HASH
    } else {
        hashes.hash_prevouts
    };

    let hash_sequence = if flags.anyone_can_pay || single_or_none {
        ZERO_HASH
    } else {
        hashes.hash_sequence
    };

    let hash_outputs = match flags.base {
        BaseMode::All => hashes.hash_outputs,
        BaseMode::Single => match tx.outputs.get(input_index) {
            Some(output) => sha256d(&output.to_bytes()),
            None => ZERO_HASH,
        },
        BaseMode::None => ZERO_HASH,
    };

    let mut writer = WireWriter::with_capacity(156 + script_code.len() + 9);
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    input.write_outpoint(&mut writer);
    writer.write_var_bytes(script_code);
    writer.write_i64_le(value);
    writer.write_u32_le(input.sequence_number);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(flag_word);
    writer.into_bytes()
}
