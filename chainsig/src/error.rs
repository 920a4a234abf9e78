use chainsig_primitives::PrimitivesError;
use chainsig_script::ScriptError;
use chainsig_transaction::TransactionError;

/// Errors returned by the [`Engine`](crate::Engine) entry points.
///
/// The lower crates' errors are folded into these kinds; the original
/// message is kept in the variant's text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input index is outside the transaction's input list.
    #[error("input index {index} out of range (tx has {inputs} inputs)")]
    InvalidInputIndex {
        /// The requested index.
        index: usize,
        /// Number of inputs the transaction has.
        inputs: usize,
    },

    /// The chain selector is not one of the supported chains.
    #[error("unknown chain code: {0}")]
    UnknownChainCode(String),

    /// Malformed hex, an unparsable script, an invalid public key or
    /// threshold, or address text that does not decode.
    #[error("script decode error: {0}")]
    ScriptDecode(String),

    /// The chain-specific address encoder rejected the hash.
    #[error("address encoding error: {0}")]
    AddressEncoding(String),

    /// The configuration names an unknown network or cannot be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ScriptError> for Error {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::UnknownChainCode(selector) => Error::UnknownChainCode(selector),
            ScriptError::UnknownNetwork(_) => Error::Config(e.to_string()),
            ScriptError::AddressEncoding(_) => Error::AddressEncoding(e.to_string()),
            ScriptError::Primitives(inner) => inner.into(),
            other => Error::ScriptDecode(other.to_string()),
        }
    }
}

impl From<TransactionError> for Error {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::InvalidInputIndex { index, inputs } => {
                Error::InvalidInputIndex { index, inputs }
            }
            TransactionError::Script(inner) => inner.into(),
            TransactionError::Primitives(inner) => inner.into(),
            other => Error::ScriptDecode(other.to_string()),
        }
    }
}

impl From<PrimitivesError> for Error {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::InvalidCashAddrHashLength(_) => Error::AddressEncoding(e.to_string()),
            other => Error::ScriptDecode(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_code_keeps_selector() {
        let err: Error = ScriptError::UnknownChainCode("7".to_string()).into();
        assert!(matches!(err, Error::UnknownChainCode(ref s) if s == "7"));
    }

    #[test]
    fn test_nested_script_error_unwraps() {
        let err: Error = TransactionError::Script(ScriptError::UnknownChainCode("ltc".into())).into();
        assert!(matches!(err, Error::UnknownChainCode(_)));

        let err: Error = TransactionError::Script(ScriptError::DataTooSmall).into();
        assert!(matches!(err, Error::ScriptDecode(_)));
    }

    #[test]
    fn test_index_fields_survive() {
        let err: Error = TransactionError::InvalidInputIndex { index: 3, inputs: 3 }.into();
        assert!(matches!(err, Error::InvalidInputIndex { index: 3, inputs: 3 }));
    }

    #[test]
    fn test_encoding_errors() {
        let err: Error = ScriptError::AddressEncoding("bad".into()).into();
        assert!(matches!(err, Error::AddressEncoding(_)));

        let err: Error = ScriptError::Primitives(PrimitivesError::InvalidCashAddrHashLength(7)).into();
        assert!(matches!(err, Error::AddressEncoding(_)));
    }

    #[test]
    fn test_unknown_network_is_config() {
        let err: Error = ScriptError::UnknownNetwork("signet".into()).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
