//! Cryptographic and encoding primitives shared by the chainsig crates.
//!
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Chain hash type for transaction and block identification
//! - Base58 / Base58Check encoding for legacy addresses
//! - CashAddr encoding for fork-id chain addresses
//! - Variable-length integers and little-endian wire readers/writers
//! - secp256k1 public key validation

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base58;
pub mod cashaddr;
pub mod ec;

mod error;
pub use error::PrimitivesError;
