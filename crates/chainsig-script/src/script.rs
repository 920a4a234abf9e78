//! The `Script` byte-vector newtype.
//!
//! Provides the standard locking-script builders, strict template checks
//! used by the classifier, opcode removal for the legacy digest, and hex
//! serialization.

use std::fmt;

use chainsig_primitives::ec::PublicKey;

use crate::chunk::{decode_script, push_data_prefix, read_chunk, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Length in bytes of the hash embedded in P2PKH and P2SH scripts.
pub const HASH160_SIZE: usize = 20;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or `InvalidHex`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn p2pkh(hash: &[u8; HASH160_SIZE]) -> Self {
        let mut b = Vec::with_capacity(25);
        b.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(hash);
        b.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(b)
    }

    /// Build `OP_HASH160 <hash> OP_EQUAL`.
    pub fn p2sh(hash: &[u8; HASH160_SIZE]) -> Self {
        let mut b = Vec::with_capacity(23);
        b.extend_from_slice(&[OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(hash);
        b.push(OP_EQUAL);
        Script(b)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the script, returning the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the script into a vector of decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// The 20-byte hash if this is exactly a P2PKH locking script.
    pub fn p2pkh_hash(&self) -> Option<[u8; HASH160_SIZE]> {
        let b = &self.0;
        if b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
        {
            b[3..23].try_into().ok()
        } else {
            None
        }
    }

    /// The 20-byte hash if this is exactly a P2SH locking script.
    pub fn p2sh_hash(&self) -> Option<[u8; HASH160_SIZE]> {
        let b = &self.0;
        if b.len() == 23 && b[0] == OP_HASH160 && b[1] == OP_DATA_20 && b[22] == OP_EQUAL {
            b[2..22].try_into().ok()
        } else {
            None
        }
    }

    /// The embedded key bytes if this is `<pubkey> OP_CHECKSIG`.
    ///
    /// Only the direct-push forms of 33-byte compressed (`02`/`03`) and
    /// 65-byte uncompressed (`04`) keys qualify, and the key must be a
    /// point on secp256k1.
    pub fn p2pk_pubkey(&self) -> Option<&[u8]> {
        let b = &self.0;
        let key = match b.first().copied() {
            Some(OP_DATA_33) if b.len() == 35 => &b[1..34],
            Some(OP_DATA_65) if b.len() == 67 => &b[1..66],
            _ => return None,
        };
        if b[b.len() - 1] != OP_CHECKSIG {
            return None;
        }
        PublicKey::from_bytes(key).ok().map(|_| key)
    }

    pub fn is_p2pkh(&self) -> bool {
        self.p2pkh_hash().is_some()
    }

    pub fn is_p2sh(&self) -> bool {
        self.p2sh_hash().is_some()
    }

    pub fn is_p2pk(&self) -> bool {
        self.p2pk_pubkey().is_some()
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes with the minimal PUSHDATA prefix.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append raw opcodes to the script.
    ///
    /// Push-data opcodes (OP_DATA_1..OP_PUSHDATA4) are rejected; use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes
            .iter()
            .find(|&&op| (OP_DATA_1..=OP_PUSHDATA4).contains(&op))
        {
            return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }

    /// Return a copy of the script with every occurrence of opcode `op` removed.
    ///
    /// Pushes whose data happens to contain the byte are kept verbatim.
    pub fn remove_opcode(&self, op: u8) -> Result<Script, ScriptError> {
        let mut out = Vec::with_capacity(self.0.len());
        let mut pos = 0;
        while pos < self.0.len() {
            let (chunk, next) = read_chunk(&self.0, pos)?;
            if chunk.data.is_some() || chunk.op != op {
                out.extend_from_slice(&self.0[pos..next]);
            }
            pos = next;
        }
        Ok(Script(out))
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
