/// Error types for script, address and multisig operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Generic invalid script error.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Attempted to append a push-data opcode as a bare opcode.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// The chain selector is not one of the supported chains.
    #[error("unknown chain code: {0}")]
    UnknownChainCode(String),

    /// The network selector is not mainnet, testnet or regtest.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// A multisig participant key failed to decode or is not a valid point.
    #[error("invalid public key #{index} '{key}': {reason}")]
    InvalidPublicKey {
        index: usize,
        key: String,
        reason: String,
    },

    /// The threshold cannot be satisfied by, or expressed for, the key set.
    #[error("invalid multisig threshold {required} of {keys}")]
    InvalidThreshold { required: usize, keys: usize },

    /// More keys than a canonical multisig script can count.
    #[error("too many public keys for multisig: {0}")]
    TooManyPublicKeys(usize),

    /// The chain-specific encoder rejected the hash.
    #[error("address encoding failed: {0}")]
    AddressEncoding(String),

    /// The address text could not be decoded for the selected chain.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] chainsig_primitives::PrimitivesError),
}
