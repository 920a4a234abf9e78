//! The chain-aware entry points.

use chainsig_script::{codec, multisig, Address, Chain, Network, Script};
use chainsig_transaction::sighash::{self, SighashCache};
use chainsig_transaction::{SighashFlags, Transaction};
use tracing::warn;

use crate::{Config, Error};

/// Anything that names a chain: a [`Chain`], a numeric chain code
/// (`0` = BCH, `2` = BTC) or a chain name (`"btc"`, `"bch"`).
pub trait ChainSelector {
    /// Resolve to a chain, or fail with [`Error::UnknownChainCode`].
    fn resolve(&self) -> Result<Chain, Error>;
}

impl ChainSelector for Chain {
    fn resolve(&self) -> Result<Chain, Error> {
        Ok(*self)
    }
}

impl ChainSelector for u8 {
    fn resolve(&self) -> Result<Chain, Error> {
        Ok(Chain::from_code(*self)?)
    }
}

impl ChainSelector for str {
    fn resolve(&self) -> Result<Chain, Error> {
        Ok(self.parse::<Chain>()?)
    }
}

impl ChainSelector for String {
    fn resolve(&self) -> Result<Chain, Error> {
        self.as_str().resolve()
    }
}

impl<T: ChainSelector + ?Sized> ChainSelector for &T {
    fn resolve(&self) -> Result<Chain, Error> {
        (**self).resolve()
    }
}

fn resolve_chain<C: ChainSelector>(chain: C) -> Result<Chain, Error> {
    chain.resolve().map_err(|e| {
        warn!(error = %e, "rejected chain selector");
        e
    })
}

/// Digest, multisig and address operations bound to one network.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    network: Network,
}

impl Engine {
    /// Build an engine from `config`, resolving its network.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Engine {
            network: config.network()?,
        })
    }

    /// An engine for `network`.
    pub fn for_network(network: Network) -> Self {
        Engine { network }
    }

    /// The network addresses are encoded for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The 32-byte digest input `input_index` of `tx` must be signed over.
    ///
    /// Legacy chains ignore `value`; fork-id chains commit to it as the
    /// value of the output being spent.
    pub fn compute_signature_digest<C: ChainSelector>(
        &self,
        tx: &Transaction,
        input_index: usize,
        script_code: &Script,
        flags: SighashFlags,
        chain: C,
        value: i64,
    ) -> Result<[u8; 32], Error> {
        let chain = resolve_chain(chain)?;
        Ok(sighash::signature_hash(tx, input_index, script_code, flags, chain, value)?)
    }

    /// Digests for every input of `tx`, sharing one set of fork-id midstates.
    ///
    /// `inputs` pairs each script code with the value it spends, in input
    /// order; its length must match the transaction's input count.
    pub fn compute_signature_digests<C: ChainSelector>(
        &self,
        tx: &Transaction,
        inputs: &[(Script, i64)],
        flags: SighashFlags,
        chain: C,
    ) -> Result<Vec<[u8; 32]>, Error> {
        let chain = resolve_chain(chain)?;
        if inputs.len() != tx.inputs.len() {
            return Err(Error::InvalidInputIndex {
                index: inputs.len().min(tx.inputs.len()),
                inputs: tx.inputs.len(),
            });
        }
        let cache = SighashCache::new(tx);
        inputs
            .iter()
            .enumerate()
            .map(|(index, (code, value))| {
                cache
                    .signature_hash(index, code, flags, chain, *value)
                    .map_err(Error::from)
            })
            .collect()
    }

    /// Build a `threshold`-of-n redeem script from hex public keys and
    /// return its pay-to-script-hash address text with the script.
    ///
    /// Keys are used in the given order.
    pub fn build_multisig<C: ChainSelector>(
        &self,
        pubkey_hexes: &[&str],
        threshold: usize,
        chain: C,
    ) -> Result<(String, Script), Error> {
        let chain = resolve_chain(chain)?;
        let built = multisig::build_multisig(pubkey_hexes, threshold, chain, self.network)?;
        Ok((built.address.to_string(), built.redeem_script))
    }

    /// The addresses `pk_script` pays to, as text in `chain`'s format.
    ///
    /// Nonstandard scripts yield an empty list.
    pub fn extract_addresses<C: ChainSelector>(
        &self,
        pk_script: &Script,
        chain: C,
    ) -> Result<Vec<String>, Error> {
        let chain = resolve_chain(chain)?;
        let addresses = codec::extract_addresses(pk_script, chain, self.network)?;
        Ok(addresses.iter().map(ToString::to_string).collect())
    }

    /// Decode address text with `chain`'s decoder.
    pub fn decode_address<C: ChainSelector>(&self, text: &str, chain: C) -> Result<Address, Error> {
        let chain = resolve_chain(chain)?;
        Ok(codec::decode_address(text, chain, self.network)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::for_network(Network::Mainnet)
    }
}
