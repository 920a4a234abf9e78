/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The input index is outside the transaction's input list.
    #[error("input index {index} out of range (tx has {inputs} inputs)")]
    InvalidInputIndex { index: usize, inputs: usize },

    /// The raw sighash value has no valid base mode or carries unknown bits.
    #[error("invalid sighash type {0:#x}")]
    InvalidSighashType(u32),

    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An underlying script error (forwarded from `chainsig-script`).
    #[error("script error: {0}")]
    Script(#[from] chainsig_script::ScriptError),

    /// An underlying primitives error (forwarded from `chainsig-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] chainsig_primitives::PrimitivesError),
}
