//! Base58 and Base58Check encoding for legacy addresses.
//!
//! Raw encoding is delegated to `bs58` with the Bitcoin alphabet; the
//! checksum layer appends the first four bytes of SHA-256d.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of the Base58Check checksum suffix.
const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Arguments
/// * `s` - The Base58 string to decode.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data` with a 4-byte double-SHA-256 checksum appended.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// # Arguments
/// * `s` - The Base58Check string to decode.
///
/// # Returns
/// The payload without its checksum, or an error for invalid characters,
/// a payload too short to carry a checksum, or a checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Base58Check-encode a version byte followed by a payload.
///
/// This is the layout of every legacy address: `version || hash`.
pub fn check_encode_versioned(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    check_encode(&data)
}

/// Decode a Base58Check string into its version byte and payload.
///
/// # Returns
/// `(version, payload)`, or an error if the checksum fails or nothing
/// remains after the checksum is stripped.
pub fn check_decode_versioned(s: &str) -> Result<(u8, Vec<u8>), PrimitivesError> {
    let mut data = check_decode(s)?;
    if data.is_empty() {
        return Err(PrimitivesError::InvalidBase58(
            "missing version byte".to_string(),
        ));
    }
    let version = data.remove(0);
    Ok((version, data))
}
