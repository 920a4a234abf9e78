//! Multi-signature redeem scripts.
//!
//! The redeem script is `OP_m <key 1> ... <key n> OP_n OP_CHECKMULTISIG`
//! with keys in caller order; reordering the keys changes the address.

use chainsig_primitives::ec::PublicKey;
use tracing::error;

use crate::address::Address;
use crate::codec::script_hash_address;
use crate::opcodes::{small_int_opcode, OP_CHECKMULTISIG};
use crate::params::{Chain, Network};
use crate::script::Script;
use crate::ScriptError;

/// Largest key count expressible by a small-integer opcode.
pub const MAX_MULTISIG_KEYS: usize = 16;

/// A redeem script together with its pay-to-script-hash address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multisig {
    pub address: Address,
    pub redeem_script: Script,
}

/// Assemble the canonical `required`-of-`pubkeys.len()` redeem script.
pub fn multisig_script(pubkeys: &[PublicKey], required: usize) -> Result<Script, ScriptError> {
    if pubkeys.len() > MAX_MULTISIG_KEYS {
        return Err(ScriptError::TooManyPublicKeys(pubkeys.len()));
    }
    let threshold = threshold_opcode(required, pubkeys.len())?;
    let count = small_int_opcode(pubkeys.len()).ok_or(ScriptError::TooManyPublicKeys(pubkeys.len()))?;

    let mut script = Script::new();
    script.append_opcodes(&[threshold])?;
    for key in pubkeys {
        script.append_push_data(key.as_bytes())?;
    }
    script.append_opcodes(&[count, OP_CHECKMULTISIG])?;
    Ok(script)
}

fn threshold_opcode(required: usize, keys: usize) -> Result<u8, ScriptError> {
    if required == 0 || required > keys {
        return Err(ScriptError::InvalidThreshold { required, keys });
    }
    small_int_opcode(required).ok_or(ScriptError::InvalidThreshold { required, keys })
}

/// Build a multisig redeem script from hex keys and derive its address.
///
/// Keys are decoded in order and the first failure is reported with its
/// position; nothing is assembled until every key is valid.
pub fn build_multisig(
    pubkey_hexes: &[&str],
    required: usize,
    chain: Chain,
    network: Network,
) -> Result<Multisig, ScriptError> {
    let build = || {
        if pubkey_hexes.len() > MAX_MULTISIG_KEYS {
            return Err(ScriptError::TooManyPublicKeys(pubkey_hexes.len()));
        }
        threshold_opcode(required, pubkey_hexes.len())?;

        let pubkeys = pubkey_hexes
            .iter()
            .enumerate()
            .map(|(index, key)| {
                PublicKey::from_hex(key).map_err(|e| ScriptError::InvalidPublicKey {
                    index,
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let redeem_script = multisig_script(&pubkeys, required)?;
        let address = script_hash_address(&redeem_script, chain, network)?;
        Ok(Multisig {
            address,
            redeem_script,
        })
    };

    build().map_err(|e| {
        error!(
            keys = pubkey_hexes.len(),
            required,
            chain = %chain,
            error = %e,
            "multisig rejected"
        );
        e
    })
}
