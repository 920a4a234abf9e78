//! Address extraction from locking scripts and address decoding.

use chainsig_primitives::ec::PublicKey;
use chainsig_primitives::hash::hash160;
use tracing::{debug, warn};

use crate::address::{Address, AddressKind};
use crate::class::{classify, ScriptClass};
use crate::params::{Chain, Network};
use crate::script::Script;
use crate::ScriptError;

/// Derive the addresses a locking script pays to, in `chain`'s format.
///
/// Key-hash and script-hash scripts re-encode their embedded hash; a
/// pay-to-pubkey script yields the key-hash address of its key, and a bare
/// multisig script yields one such address per valid key in script order.
/// Keys that are not secp256k1 points are skipped. Unrecognized scripts
/// yield an empty list rather than an error.
pub fn extract_addresses(
    script: &Script,
    chain: Chain,
    network: Network,
) -> Result<Vec<Address>, ScriptError> {
    let class = classify(script);
    let encode = |kind: AddressKind, hash: [u8; 20]| {
        Address::from_hash(chain, kind, hash, network).map_err(|e| {
            warn!(script = %script, chain = %chain, error = %e, "address encoding failed");
            e
        })
    };

    match class {
        ScriptClass::PubKeyHash(hash) => Ok(vec![encode(AddressKind::PubKeyHash, hash)?]),
        ScriptClass::ScriptHash(hash) => Ok(vec![encode(AddressKind::ScriptHash, hash)?]),
        ScriptClass::PubKey(key) => Ok(vec![encode(AddressKind::PubKeyHash, hash160(&key))?]),
        ScriptClass::MultiSig { pubkeys, .. } => pubkeys
            .iter()
            .filter(|key| match PublicKey::from_bytes(key) {
                Ok(_) => true,
                Err(e) => {
                    debug!(pubkey = %hex::encode(key), error = %e, "skipping invalid multisig key");
                    false
                }
            })
            .map(|key| encode(AddressKind::PubKeyHash, hash160(key)))
            .collect(),
        ScriptClass::Unrecognized => {
            debug!(script = %script, "no address for nonstandard script");
            Ok(Vec::new())
        }
    }
}

/// Decode address text with `chain`'s decoder.
pub fn decode_address(text: &str, chain: Chain, network: Network) -> Result<Address, ScriptError> {
    Address::decode(text, chain, network).map_err(|e| {
        warn!(address = text, chain = %chain, error = %e, "address decoding failed");
        e
    })
}

/// The pay-to-script-hash address of `redeem_script` in `chain`'s format.
pub fn script_hash_address(
    redeem_script: &Script,
    chain: Chain,
    network: Network,
) -> Result<Address, ScriptError> {
    Address::from_hash(
        chain,
        AddressKind::ScriptHash,
        hash160(redeem_script.to_bytes()),
        network,
    )
}
