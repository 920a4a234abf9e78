#![deny(missing_docs)]

//! chainsig - signature digests and addresses for Bitcoin-format chains.
//!
//! Re-exports the workspace crates and adds the [`Engine`], which exposes
//! the four chain-aware entry points behind a single network selection:
//!
//! - [`Engine::compute_signature_digest`]
//! - [`Engine::build_multisig`]
//! - [`Engine::extract_addresses`]
//! - [`Engine::decode_address`]
//!
//! ```no_run
//! use chainsig::{Config, Engine};
//!
//! # fn main() -> Result<(), chainsig::Error> {
//! let engine = Engine::new(&Config::from_env())?;
//! let (address, redeem_script) = engine.build_multisig(
//!     &[
//!         "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce",
//!         "02798913bc057b344de675dac34faafe3dc2f312c758cd9068209f810877306d66",
//!     ],
//!     2,
//!     "bch",
//! )?;
//! println!("{address} {redeem_script}");
//! # Ok(())
//! # }
//! ```

pub use chainsig_primitives as primitives;
pub use chainsig_script as script;
pub use chainsig_transaction as transaction;

pub use chainsig_script::{Address, Chain, Network, Script};
pub use chainsig_transaction::{SighashFlags, Transaction};

mod config;
mod engine;
mod error;
mod prepared;

pub use config::{Config, NET_PARAM_ENV};
pub use engine::{ChainSelector, Engine};
pub use error::Error;
pub use prepared::{PreparedTx, UNKNOWN_BLOCK_HEIGHT, UNKNOWN_CONFIRMATIONS, UNKNOWN_TX_INDEX};
