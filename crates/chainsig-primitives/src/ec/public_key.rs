//! secp256k1 public key as it appears inside scripts.
//!
//! Scripts commit to the exact serialized bytes of a key, so a
//! `PublicKey` keeps the caller's encoding (compressed or uncompressed)
//! verbatim after checking that it is a point on the curve.

use std::fmt;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A validated SEC1-encoded secp256k1 public key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Validate SEC1-encoded bytes as a secp256k1 point.
    ///
    /// Accepts compressed (33-byte, `0x02`/`0x03`) and uncompressed
    /// (65-byte, `0x04`) encodings.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` holding the bytes unchanged, or an error if the
    /// length, prefix or point is invalid.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        match (bytes.len(), bytes.first()) {
            (0, _) => {
                return Err(PrimitivesError::InvalidPublicKey(
                    "pubkey is empty".to_string(),
                ))
            }
            (COMPRESSED_LEN, Some(0x02 | 0x03)) | (UNCOMPRESSED_LEN, Some(0x04)) => {}
            (len, prefix) => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "unsupported encoding: {} bytes with prefix {:#04x}",
                    len,
                    prefix.copied().unwrap_or_default()
                )))
            }
        }

        k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::InvalidPublicKey("point not on curve".to_string()))?;

        Ok(PublicKey {
            bytes: bytes.to_vec(),
        })
    }

    /// Decode a hex string and validate it as a public key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// The serialized key exactly as supplied.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_compressed(&self) -> bool {
        self.bytes.len() == COMPRESSED_LEN
    }

    /// Hash160 of the serialized key: the pay-to-pubkey-hash payload.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
