//! Elliptic curve helpers on secp256k1.
//!
//! Only public key validation lives here; signing happens outside the
//! chainsig crates.

pub mod public_key;

pub use public_key::PublicKey;
