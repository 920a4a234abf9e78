//! Transaction input referencing a previous output.

use chainsig_primitives::chainhash::Hash;
use chainsig_primitives::util::{WireReader, WireWriter};
use chainsig_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input of a transaction.
///
/// # Wire format
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | source_txid        | 32 bytes (LE)    |
/// | source_tx_out_index| 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence_number    | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// Id of the transaction holding the spent output, in internal byte order.
    pub source_txid: Hash,

    /// Index of the output within the source transaction.
    pub source_tx_out_index: u32,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,

    /// The unlocking script (scriptSig); empty while unsigned.
    pub unlocking_script: Script,
}

impl TransactionInput {
    /// An unsigned, finalized input spending `source_txid:index`.
    pub fn new(source_txid: Hash, source_tx_out_index: u32) -> Self {
        TransactionInput {
            source_txid,
            source_tx_out_index,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: Script::new(),
        }
    }

    /// Deserialize an input from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let source_txid = reader
            .read_array::<32>()
            .map(Hash::new)
            .map_err(|e| TransactionError::SerializationError(format!("reading source txid: {}", e)))?;

        let source_tx_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_len = usize::try_from(script_len.value()).map_err(|_| {
            TransactionError::SerializationError(format!(
                "script length {} does not fit in memory",
                script_len.value()
            ))
        })?;

        let script_bytes = reader.read_bytes(script_len).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        Ok(TransactionInput {
            source_txid,
            source_tx_out_index,
            sequence_number,
            unlocking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this input into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        self.write_outpoint(writer);
        writer.write_var_bytes(self.unlocking_script.to_bytes());
        writer.write_u32_le(self.sequence_number);
    }

    /// Write the 36-byte outpoint (txid followed by output index).
    pub fn write_outpoint(&self, writer: &mut WireWriter) {
        writer.write_bytes(self.source_txid.as_bytes());
        writer.write_u32_le(self.source_tx_out_index);
    }
}
