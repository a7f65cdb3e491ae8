use std::collections::HashMap;

use eyre::ContextCompat;
use serde::{Deserialize, Serialize};

use crate::types::ChainId;

pub const DEFAULT_NETWORK: &str = "holesky";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_network")]
    pub default_network: String,
    pub networks: HashMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: ChainId,
    #[serde(default)]
    pub explorer: Option<ExplorerConfig>,
}

/// Etherscan compatible block explorer of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub api_url: String,
    pub browser_url: String,
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

impl Default for Config {
    fn default() -> Self {
        let holesky = NetworkConfig {
            chain_id: ChainId(17000),
            explorer: Some(ExplorerConfig {
                api_url: "https://api-holesky.etherscan.io/api".to_string(),
                browser_url: "https://holesky.etherscan.io".to_string(),
            }),
        };

        Self {
            default_network: default_network(),
            networks: maplit::hashmap! {
                DEFAULT_NETWORK.to_string() => holesky,
            },
        }
    }
}

impl Config {
    /// Resolves the network to deploy to, falling back to the default one
    pub fn network(
        &self,
        name: Option<&str>,
    ) -> eyre::Result<(&str, &NetworkConfig)> {
        let name = name.unwrap_or(&self.default_network);

        let (name, network) =
            self.networks.get_key_value(name).with_context(|| {
                let mut known: Vec<_> =
                    self.networks.keys().map(String::as_str).collect();
                known.sort();

                format!(
                    "Unknown network {name}, expected one of: {}",
                    known.join(", ")
                )
            })?;

        Ok((name.as_str(), network))
    }
}

impl ExplorerConfig {
    pub fn address_url(&self, address: ethers::types::Address) -> String {
        let base = self.browser_url.trim_end_matches('/');

        format!("{base}/address/{address:?}")
    }
}

#[cfg(test)]
mod tests {
    use ethers::types::Address;
    use indoc::indoc;

    use super::*;

    #[test]
    fn default_is_holesky() {
        let config = Config::default();

        let (name, network) = config.network(None).unwrap();

        assert_eq!(name, "holesky");
        assert_eq!(network.chain_id, ChainId(17000));
        assert_eq!(
            network.explorer.as_ref().unwrap().api_url,
            "https://api-holesky.etherscan.io/api"
        );
    }

    #[test]
    fn unknown_network_lists_known_ones() {
        let config = Config::default();

        let err = config.network(Some("mainnet")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unknown network mainnet, expected one of: holesky"
        );
    }

    #[test]
    fn parses_yaml_config() {
        let config: Config = serde_yaml::from_str(indoc! {"
            default_network: anvil
            networks:
              anvil:
                chain_id: 31337
              sepolia:
                chain_id: 11155111
                explorer:
                  api_url: https://api-sepolia.etherscan.io/api
                  browser_url: https://sepolia.etherscan.io/
        "})
        .unwrap();

        let (name, anvil) = config.network(None).unwrap();
        assert_eq!(name, "anvil");
        assert_eq!(anvil.chain_id, ChainId(31337));
        assert!(anvil.explorer.is_none());

        let (_, sepolia) = config.network(Some("sepolia")).unwrap();
        let explorer = sepolia.explorer.as_ref().unwrap();
        assert_eq!(
            explorer.address_url(Address::zero()),
            "https://sepolia.etherscan.io/address/0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn default_network_is_optional_in_yaml() {
        let config: Config = serde_yaml::from_str(indoc! {"
            networks:
              holesky:
                chain_id: 17000
        "})
        .unwrap();

        assert_eq!(config.default_network, DEFAULT_NETWORK);
    }
}
