//! Network parameters and chain selection.
//!
//! `Network` picks the byte constants and prefixes an address encoder
//! needs; `Chain` picks which digest algorithm and address format apply.
//! Neither has a default: an unknown selector is always an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ScriptError;

/// Numeric chain code selecting Bitcoin Cash.
pub const CHAIN_CODE_BCH: u8 = 0;
/// Numeric chain code selecting Bitcoin.
pub const CHAIN_CODE_BTC: u8 = 2;

/// Address-relevant constants of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetParams {
    /// Canonical network name.
    pub name: &'static str,
    /// Base58Check version byte of pay-to-pubkey-hash addresses.
    pub p2pkh_version: u8,
    /// Base58Check version byte of pay-to-script-hash addresses.
    pub p2sh_version: u8,
    /// CashAddr human-readable prefix.
    pub cash_addr_prefix: &'static str,
}

pub static MAINNET_PARAMS: NetParams = NetParams {
    name: "mainnet",
    p2pkh_version: 0x00,
    p2sh_version: 0x05,
    cash_addr_prefix: "bitcoincash",
};

pub static TESTNET_PARAMS: NetParams = NetParams {
    name: "testnet3",
    p2pkh_version: 0x6f,
    p2sh_version: 0xc4,
    cash_addr_prefix: "bchtest",
};

pub static REGTEST_PARAMS: NetParams = NetParams {
    name: "regtest",
    p2pkh_version: 0x6f,
    p2sh_version: 0xc4,
    cash_addr_prefix: "bchreg",
};

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The network an address is encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// The parameter table for this network.
    pub fn params(self) -> &'static NetParams {
        match self {
            Network::Mainnet => &MAINNET_PARAMS,
            Network::Testnet => &TESTNET_PARAMS,
            Network::Regtest => &REGTEST_PARAMS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    /// Parse `mainnet`, `testnet` (or `testnet3`) and `regtest`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" | "testnet3" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(ScriptError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Which chain's digest algorithm and address format apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Legacy whole-transaction digest, Base58Check addresses.
    Btc,
    /// Fork-id midstate digest, CashAddr addresses.
    Bch,
}

impl Chain {
    /// Resolve a numeric chain code.
    pub fn from_code(code: u8) -> Result<Self, ScriptError> {
        match code {
            CHAIN_CODE_BCH => Ok(Chain::Bch),
            CHAIN_CODE_BTC => Ok(Chain::Btc),
            other => Err(ScriptError::UnknownChainCode(other.to_string())),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Chain::Bch => CHAIN_CODE_BCH,
            Chain::Btc => CHAIN_CODE_BTC,
        }
    }

    /// Whether digests on this chain fold the fork-id bit into the flag word.
    pub fn uses_fork_id(self) -> bool {
        matches!(self, Chain::Bch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Chain::Btc => "btc",
            Chain::Bch => "bch",
        }
    }
}

impl TryFrom<u8> for Chain {
    type Error = ScriptError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Chain::from_code(code)
    }
}

impl FromStr for Chain {
    type Err = ScriptError;

    /// Parse a chain name (`btc`, `bch`) or its numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "btc" => Ok(Chain::Btc),
            "bch" => Ok(Chain::Bch),
            _ => match trimmed.parse::<u8>() {
                Ok(code) => Chain::from_code(code),
                Err(_) => Err(ScriptError::UnknownChainCode(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
