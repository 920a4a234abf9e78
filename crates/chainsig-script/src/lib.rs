//! Script handling for the chainsig workspace.
//!
//! Provides the `Script` type and opcode constants, network and chain
//! selection, the output-script classifier, chain-specific address
//! encoding/decoding, and multi-signature redeem script construction.

pub mod opcodes;
pub mod chunk;
pub mod script;
pub mod params;
pub mod class;
pub mod address;
pub mod codec;
pub mod multisig;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use chunk::ScriptChunk;
pub use params::{Chain, NetParams, Network};
pub use class::{classify, ScriptClass};
pub use address::{Address, AddressKind, CashAddress, LegacyAddress};
pub use codec::{decode_address, extract_addresses, script_hash_address};
pub use multisig::{build_multisig, multisig_script, Multisig};
