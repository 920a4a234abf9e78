//! CashAddr encoding and decoding.
//!
//! CashAddr is the checksum-prefixed address format used by fork-id
//! chains. An address is `prefix:payload` where the payload is base32
//! (alphabet `qpzry9x8gf2tvdw0s3jn54khce6mua7l`) over
//! `version_byte || hash`, followed by a 40-bit BCH checksum computed over
//! the lower five bits of every prefix character, a zero separator, the
//! payload and eight zero groups.
//!
//! The version byte carries the address type in bits 3..=6 and a hash size
//! code in bits 0..=2.
//!
//! See <https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md>

use crate::PrimitivesError;

/// The base32 alphabet.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Number of 5-bit groups in the checksum.
const CHECKSUM_GROUPS: usize = 8;

/// Separator between prefix and payload.
const SEPARATOR: char = ':';

/// The kind of hash a CashAddr payload commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CashAddrType {
    /// Pay-to-public-key-hash (type bits `0`).
    PubKeyHash,
    /// Pay-to-script-hash (type bits `1`).
    ScriptHash,
}

impl CashAddrType {
    fn type_bits(self) -> u8 {
        match self {
            CashAddrType::PubKeyHash => 0,
            CashAddrType::ScriptHash => 1,
        }
    }

    fn from_type_bits(bits: u8) -> Result<Self, PrimitivesError> {
        match bits {
            0 => Ok(CashAddrType::PubKeyHash),
            1 => Ok(CashAddrType::ScriptHash),
            other => Err(PrimitivesError::InvalidCashAddr(format!(
                "unknown address type {}",
                other
            ))),
        }
    }
}

/// A decoded CashAddr: the prefix it was checked against, its type and hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CashAddrPayload {
    pub prefix: String,
    pub kind: CashAddrType,
    pub hash: Vec<u8>,
}

/// Encode a hash as a CashAddr string with the given prefix.
///
/// # Arguments
/// * `prefix` - Network prefix, e.g. `bitcoincash` or `bchtest`.
/// * `kind`   - Whether the hash is a key hash or a script hash.
/// * `hash`   - The hash bytes; must be one of the lengths the size code can
///   express (20, 24, 28, 32, 40, 48, 56 or 64 bytes).
///
/// # Returns
/// The lowercase `prefix:payload` string, or an error for an unsupported
/// hash length or an empty prefix.
pub fn encode(prefix: &str, kind: CashAddrType, hash: &[u8]) -> Result<String, PrimitivesError> {
    if prefix.is_empty() {
        return Err(PrimitivesError::InvalidCashAddr("empty prefix".to_string()));
    }
    let prefix = prefix.to_ascii_lowercase();
    let size_code = size_code(hash.len())?;

    let mut raw = Vec::with_capacity(1 + hash.len());
    raw.push((kind.type_bits() << 3) | size_code);
    raw.extend_from_slice(hash);
    let payload = convert_bits(&raw, 8, 5, true)?;

    let checksum = checksum(&prefix, &payload);

    let mut out = String::with_capacity(prefix.len() + 1 + payload.len() + CHECKSUM_GROUPS);
    out.push_str(&prefix);
    out.push(SEPARATOR);
    for group in payload.iter().chain(checksum.iter()) {
        out.push(CHARSET[*group as usize] as char);
    }
    Ok(out)
}

/// Decode a CashAddr string, checking it against the expected prefix.
///
/// The prefix may be omitted from `addr`, in which case `expected_prefix`
/// is assumed. Upper- and lowercase are both accepted, but not mixed.
///
/// # Arguments
/// * `addr`            - The address text.
/// * `expected_prefix` - The network prefix the address must carry.
///
/// # Returns
/// The decoded payload, or an error for mixed case, an unknown character,
/// a prefix mismatch, a checksum failure, non-zero padding, or a version
/// byte whose size code disagrees with the hash length.
pub fn decode(addr: &str, expected_prefix: &str) -> Result<CashAddrPayload, PrimitivesError> {
    let has_lower = addr.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = addr.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(PrimitivesError::InvalidCashAddr("mixed case".to_string()));
    }
    let addr = addr.to_ascii_lowercase();
    let expected_prefix = expected_prefix.to_ascii_lowercase();

    let (prefix, body) = match addr.rfind(SEPARATOR) {
        Some(pos) => (addr[..pos].to_string(), &addr[pos + 1..]),
        None => (expected_prefix.clone(), addr.as_str()),
    };
    if prefix != expected_prefix {
        return Err(PrimitivesError::InvalidCashAddr(format!(
            "prefix '{}' does not match expected '{}'",
            prefix, expected_prefix
        )));
    }

    let mut groups = Vec::with_capacity(body.len());
    for c in body.bytes() {
        let value = CHARSET.iter().position(|&x| x == c).ok_or_else(|| {
            PrimitivesError::InvalidCashAddr(format!("invalid character '{}'", c as char))
        })?;
        groups.push(value as u8);
    }
    if groups.len() <= CHECKSUM_GROUPS {
        return Err(PrimitivesError::InvalidCashAddr("payload too short".to_string()));
    }
    if polymod(&checksum_input(&prefix, &groups)) != 0 {
        return Err(PrimitivesError::ChecksumMismatch);
    }

    let payload = &groups[..groups.len() - CHECKSUM_GROUPS];
    let raw = convert_bits(payload, 5, 8, false)?;
    let (version, hash) = raw
        .split_first()
        .ok_or_else(|| PrimitivesError::InvalidCashAddr("empty payload".to_string()))?;

    if version & 0x80 != 0 {
        return Err(PrimitivesError::InvalidCashAddr("reserved version bit set".to_string()));
    }
    let kind = CashAddrType::from_type_bits((version >> 3) & 0x0f)?;
    if size_code(hash.len())? != version & 0x07 {
        return Err(PrimitivesError::InvalidCashAddr(format!(
            "hash length {} does not match version byte {:#04x}",
            hash.len(),
            version
        )));
    }

    Ok(CashAddrPayload {
        prefix,
        kind,
        hash: hash.to_vec(),
    })
}

/// Map a hash length to the 3-bit size code of the version byte.
fn size_code(len: usize) -> Result<u8, PrimitivesError> {
    match len {
        20 => Ok(0),
        24 => Ok(1),
        28 => Ok(2),
        32 => Ok(3),
        40 => Ok(4),
        48 => Ok(5),
        56 => Ok(6),
        64 => Ok(7),
        other => Err(PrimitivesError::InvalidCashAddrHashLength(other)),
    }
}

/// Build the polymod input: prefix low bits, separator zero, data groups.
fn checksum_input(prefix: &str, groups: &[u8]) -> Vec<u8> {
    let mut values = Vec::with_capacity(prefix.len() + 1 + groups.len() + CHECKSUM_GROUPS);
    values.extend(prefix.bytes().map(|b| b & 0x1f));
    values.push(0);
    values.extend_from_slice(groups);
    values
}

/// Compute the eight checksum groups for a payload.
fn checksum(prefix: &str, payload: &[u8]) -> [u8; CHECKSUM_GROUPS] {
    let mut values = checksum_input(prefix, payload);
    values.extend_from_slice(&[0u8; CHECKSUM_GROUPS]);
    let m = polymod(&values);

    let mut out = [0u8; CHECKSUM_GROUPS];
    for (i, group) in out.iter_mut().enumerate() {
        *group = ((m >> (5 * (7 - i))) & 0x1f) as u8;
    }
    out
}

/// The CashAddr BCH code over GF(2^5); returns zero for a valid string.
fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98_f2bc_8e61,
        0x79_b76d_99e2,
        0xf3_3e5f_b3c4,
        0xae_2eab_e2a8,
        0x1e_4f43_e470,
    ];

    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << bit) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Regroup a bit stream from `from`-bit to `to`-bit values.
///
/// With `pad` the trailing bits are zero-padded into a final group;
/// without it, leftover bits must be fewer than `from` and all zero.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, PrimitivesError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let value = u32::from(value);
        if value >> from != 0 {
            return Err(PrimitivesError::InvalidCashAddr(format!(
                "value {} exceeds {} bits",
                value, from
            )));
        }
        acc = (acc << from) | value;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(PrimitivesError::InvalidCashAddr("non-zero padding".to_string()));
    }

    Ok(out)
}
