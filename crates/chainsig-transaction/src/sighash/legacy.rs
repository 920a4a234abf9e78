//! Legacy whole-transaction digest.
//!
//! Serializes a modified copy of the transaction per input and appends
//! the flag word. The historical quirks are kept byte-for-byte: separators
//! are stripped from the script code, other inputs' sequences are zeroed
//! for NONE and SINGLE, and SINGLE past the last output yields the
//! constant `0x01` digest.

use chainsig_primitives::hash::sha256d;
use chainsig_primitives::util::WireWriter;
use chainsig_script::opcodes::OP_CODESEPARATOR;
use chainsig_script::Script;

use super::flags::{BaseMode, SighashFlags};
use crate::output::TransactionOutput;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Digest returned for SINGLE when the input has no matching output.
pub const SINGLE_OUT_OF_RANGE_DIGEST: [u8; 32] = [
    0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Compute the legacy digest. The caller has checked the index.
pub(crate) fn digest(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: SighashFlags,
) -> Result<[u8; 32], TransactionError> {
    if flags.base == BaseMode::Single && input_index >= tx.outputs.len() {
        return Ok(SINGLE_OUT_OF_RANGE_DIGEST);
    }

    let script_code = script_code.remove_opcode(OP_CODESEPARATOR)?;
    let mut copy = tx.clone();

    for (i, input) in copy.inputs.iter_mut().enumerate() {
        input.unlocking_script = if i == input_index {
            script_code.clone()
        } else {
            Script::new()
        };
    }

    match flags.base {
        BaseMode::All => {}
        BaseMode::None => {
            copy.outputs.clear();
            zero_other_sequences(&mut copy, input_index);
        }
        BaseMode::Single => {
            copy.outputs.truncate(input_index + 1);
            for output in copy.outputs.iter_mut().take(input_index) {
                *output = TransactionOutput::new(-1, Script::new());
            }
            zero_other_sequences(&mut copy, input_index);
        }
    }

    if flags.anyone_can_pay {
        let target = copy.inputs.swap_remove(input_index);
        copy.inputs = vec![target];
    }

    let mut writer = WireWriter::with_capacity(256);
    copy.write_to(&mut writer);
    writer.write_u32_le(flags.to_u32());
    Ok(sha256d(writer.as_bytes()))
}

fn zero_other_sequences(tx: &mut Transaction, input_index: usize) {
    for (i, input) in tx.inputs.iter_mut().enumerate() {
        if i != input_index {
            input.sequence_number = 0;
        }
    }
}
