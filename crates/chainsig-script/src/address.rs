//! Chain-specific address types.
//!
//! Bitcoin addresses are Base58Check strings of `version || hash160`;
//! Bitcoin Cash addresses are CashAddr strings under the network prefix.
//! Both commit to a 20-byte hash of either a public key or a script.

use std::fmt;

use chainsig_primitives::base58;
use chainsig_primitives::cashaddr::{self, CashAddrType};

use crate::params::{Chain, Network};
use crate::script::{Script, HASH160_SIZE};
use crate::ScriptError;

/// What an address hash commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    PubKeyHash,
    ScriptHash,
}

impl From<AddressKind> for CashAddrType {
    fn from(kind: AddressKind) -> Self {
        match kind {
            AddressKind::PubKeyHash => CashAddrType::PubKeyHash,
            AddressKind::ScriptHash => CashAddrType::ScriptHash,
        }
    }
}

impl From<CashAddrType> for AddressKind {
    fn from(kind: CashAddrType) -> Self {
        match kind {
            CashAddrType::PubKeyHash => AddressKind::PubKeyHash,
            CashAddrType::ScriptHash => AddressKind::ScriptHash,
        }
    }
}

fn invalid(address: &str, reason: impl ToString) -> ScriptError {
    ScriptError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

fn hash_array(address: &str, hash: &[u8]) -> Result<[u8; HASH160_SIZE], ScriptError> {
    hash.try_into()
        .map_err(|_| invalid(address, format!("hash is {} bytes, want 20", hash.len())))
}

// ---------------------------------------------------------------------------
// LegacyAddress
// ---------------------------------------------------------------------------

/// A Base58Check address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyAddress {
    encoded: String,
    kind: AddressKind,
    hash: [u8; HASH160_SIZE],
    network: Network,
}

impl LegacyAddress {
    /// Encode a hash under the network's version byte for `kind`.
    pub fn new(kind: AddressKind, hash: [u8; HASH160_SIZE], network: Network) -> Self {
        let params = network.params();
        let version = match kind {
            AddressKind::PubKeyHash => params.p2pkh_version,
            AddressKind::ScriptHash => params.p2sh_version,
        };
        LegacyAddress {
            encoded: base58::check_encode_versioned(version, &hash),
            kind,
            hash,
            network,
        }
    }

    /// Decode a Base58Check address for `network`.
    ///
    /// The checksum must verify and the version byte must be the network's
    /// P2PKH or P2SH byte.
    pub fn decode(text: &str, network: Network) -> Result<Self, ScriptError> {
        let (version, payload) =
            base58::check_decode_versioned(text).map_err(|e| invalid(text, e))?;
        let params = network.params();
        let kind = if version == params.p2pkh_version {
            AddressKind::PubKeyHash
        } else if version == params.p2sh_version {
            AddressKind::ScriptHash
        } else {
            return Err(invalid(
                text,
                format!("version byte {:#04x} is not valid on {}", version, network),
            ));
        };
        Ok(LegacyAddress {
            encoded: text.to_string(),
            kind,
            hash: hash_array(text, &payload)?,
            network,
        })
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn hash(&self) -> &[u8; HASH160_SIZE] {
        &self.hash
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

// ---------------------------------------------------------------------------
// CashAddress
// ---------------------------------------------------------------------------

/// A CashAddr address, always held in its prefixed lowercase form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CashAddress {
    encoded: String,
    kind: AddressKind,
    hash: [u8; HASH160_SIZE],
    network: Network,
}

impl CashAddress {
    /// Encode a hash under the network's CashAddr prefix.
    pub fn new(
        kind: AddressKind,
        hash: [u8; HASH160_SIZE],
        network: Network,
    ) -> Result<Self, ScriptError> {
        let encoded = cashaddr::encode(network.params().cash_addr_prefix, kind.into(), &hash)
            .map_err(|e| ScriptError::AddressEncoding(e.to_string()))?;
        Ok(CashAddress {
            encoded,
            kind,
            hash,
            network,
        })
    }

    /// Decode a CashAddr address for `network`; the prefix may be omitted.
    pub fn decode(text: &str, network: Network) -> Result<Self, ScriptError> {
        let payload = cashaddr::decode(text, network.params().cash_addr_prefix)
            .map_err(|e| invalid(text, e))?;
        let hash = hash_array(text, &payload.hash)?;
        let kind = AddressKind::from(payload.kind);
        Self::new(kind, hash, network)
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn hash(&self) -> &[u8; HASH160_SIZE] {
        &self.hash
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An address in the format of one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    Legacy(LegacyAddress),
    Cash(CashAddress),
}

impl Address {
    /// Encode `hash` in the native address format of `chain`.
    pub fn from_hash(
        chain: Chain,
        kind: AddressKind,
        hash: [u8; HASH160_SIZE],
        network: Network,
    ) -> Result<Self, ScriptError> {
        match chain {
            Chain::Btc => Ok(Address::Legacy(LegacyAddress::new(kind, hash, network))),
            Chain::Bch => CashAddress::new(kind, hash, network).map(Address::Cash),
        }
    }

    /// Decode address text with the decoder of `chain`.
    pub fn decode(text: &str, chain: Chain, network: Network) -> Result<Self, ScriptError> {
        match chain {
            Chain::Btc => LegacyAddress::decode(text, network).map(Address::Legacy),
            Chain::Bch => CashAddress::decode(text, network).map(Address::Cash),
        }
    }

    pub fn chain(&self) -> Chain {
        match self {
            Address::Legacy(_) => Chain::Btc,
            Address::Cash(_) => Chain::Bch,
        }
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            Address::Legacy(a) => a.kind(),
            Address::Cash(a) => a.kind(),
        }
    }

    pub fn hash(&self) -> &[u8; HASH160_SIZE] {
        match self {
            Address::Legacy(a) => a.hash(),
            Address::Cash(a) => a.hash(),
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Address::Legacy(a) => a.network(),
            Address::Cash(a) => a.network(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Address::Legacy(a) => a.as_str(),
            Address::Cash(a) => a.as_str(),
        }
    }

    /// The locking script that pays to this address.
    pub fn script_pubkey(&self) -> Script {
        match self.kind() {
            AddressKind::PubKeyHash => Script::p2pkh(self.hash()),
            AddressKind::ScriptHash => Script::p2sh(self.hash()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
