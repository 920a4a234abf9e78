/// Unified error type for all primitives operations.
///
/// Covers hex/hash parsing, the Base58Check and CashAddr codecs, wire
/// decoding and public key validation.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid cashaddr: {0}")]
    InvalidCashAddr(String),

    #[error("unsupported hash length for cashaddr: {0} bytes")]
    InvalidCashAddrHashLength(usize),

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
