//! Output-script classification.
//!
//! `classify` is the only place that inspects script bytes for a
//! destination; address code matches on the returned `ScriptClass`.

use crate::opcodes::*;
use crate::script::Script;

/// The standard forms an output script can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptClass {
    /// `<pubkey> OP_CHECKSIG` with a valid curve point; carries the raw key bytes.
    PubKey(Vec<u8>),
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
    PubKeyHash([u8; 20]),
    /// `OP_HASH160 <hash> OP_EQUAL`.
    ScriptHash([u8; 20]),
    /// Bare `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`. Keys are checked for
    /// shape only; address extraction skips the ones off the curve.
    MultiSig { required: usize, pubkeys: Vec<Vec<u8>> },
    /// Anything else, including null-data and malformed scripts.
    Unrecognized,
}

impl ScriptClass {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptClass::PubKey(_) => "pubkey",
            ScriptClass::PubKeyHash(_) => "pubkeyhash",
            ScriptClass::ScriptHash(_) => "scripthash",
            ScriptClass::MultiSig { .. } => "multisig",
            ScriptClass::Unrecognized => "nonstandard",
        }
    }
}

/// Classify a locking script.
pub fn classify(script: &Script) -> ScriptClass {
    if let Some(hash) = script.p2pkh_hash() {
        return ScriptClass::PubKeyHash(hash);
    }
    if let Some(hash) = script.p2sh_hash() {
        return ScriptClass::ScriptHash(hash);
    }
    if let Some(key) = script.p2pk_pubkey() {
        return ScriptClass::PubKey(key.to_vec());
    }
    match bare_multisig(script) {
        Some((required, pubkeys)) => ScriptClass::MultiSig { required, pubkeys },
        None => ScriptClass::Unrecognized,
    }
}

fn bare_multisig(script: &Script) -> Option<(usize, Vec<Vec<u8>>)> {
    let chunks = script.chunks().ok()?;
    if chunks.len() < 4 || chunks[chunks.len() - 1].op != OP_CHECKMULTISIG {
        return None;
    }
    let required = small_int_value(chunks[0].op)?;
    let count = small_int_value(chunks[chunks.len() - 2].op)?;
    let keys = &chunks[1..chunks.len() - 2];
    if required == 0 || required > count || keys.len() != count {
        return None;
    }

    let mut pubkeys = Vec::with_capacity(count);
    for chunk in keys {
        match chunk.data.as_deref() {
            Some(key) if is_pubkey_shaped(chunk.op, key) => pubkeys.push(key.to_vec()),
            _ => return None,
        }
    }
    Some((required, pubkeys))
}

fn is_pubkey_shaped(op: u8, key: &[u8]) -> bool {
    matches!(
        (op, key.first().copied()),
        (OP_DATA_33, Some(0x02)) | (OP_DATA_33, Some(0x03)) | (OP_DATA_65, Some(0x04))
    )
}
