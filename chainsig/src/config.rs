//! Engine configuration.
//!
//! Loaded from JSON, from the environment, or built directly.

use serde::{Deserialize, Serialize};

use chainsig_script::Network;

use crate::Error;

/// Environment variable naming the network (`mainnet`, `testnet`, `regtest`).
pub const NET_PARAM_ENV: &str = "CHAINSIG_NET_PARAM";

/// Network selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Network name, resolved by [`Config::network`].
    #[serde(default = "default_net_param")]
    pub net_param: String,
}

fn default_net_param() -> String {
    Network::Mainnet.as_str().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            net_param: default_net_param(),
        }
    }
}

impl Config {
    /// Configuration for `network`.
    pub fn new(network: Network) -> Self {
        Config {
            net_param: network.as_str().to_string(),
        }
    }

    /// Load from the `CHAINSIG_NET_PARAM` variable.
    ///
    /// An unset variable keeps the default. The value is validated when the
    /// engine is built, not here.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var(NET_PARAM_ENV) {
            config.net_param = val;
        }

        config
    }

    /// Parse a JSON document such as `{"net_param": "testnet"}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve `net_param` to a network.
    pub fn network(&self) -> Result<Network, Error> {
        Ok(self.net_param.parse::<Network>()?)
    }
}
