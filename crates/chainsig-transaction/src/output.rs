//! Transaction output with a value and locking script.

use chainsig_primitives::util::{WireReader, WireWriter};
use chainsig_script::Script;

use crate::TransactionError;

/// A single output of a transaction.
///
/// The value is signed: the legacy SINGLE digest serializes blanked
/// outputs with a value of `-1`.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | value            | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Amount locked by this output, in satoshis.
    pub value: i64,

    /// The locking script (scriptPubKey).
    pub locking_script: Script,
}

impl TransactionOutput {
    pub fn new(value: i64, locking_script: Script) -> Self {
        TransactionOutput {
            value,
            locking_script,
        }
    }

    /// Deserialize an output from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let value = reader.read_i64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading value: {}", e))
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
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            value,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this output into a `WireWriter`.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_i64_le(self.value);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}
