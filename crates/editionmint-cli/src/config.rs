//! CLI configuration management.
//!
//! Named networks, the target contract address and pinning credentials.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A reachable network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Expected chain ID
    pub chain_id: u64,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Network used when --network is not given
    pub default_network: String,
    /// Address of the editions contract. Deliberately has no default: it is
    /// set per deployment via `editionmint config set contract <addr>`.
    pub contract_address: Option<String>,
    /// Public gateway used to build display URLs for pinned content
    pub gateway_url: String,
    /// Pinning service API base URL
    pub pinning_api_url: String,
    /// Pinning API key; the PINATA_API_KEY env var takes precedence
    pub pinning_api_key: Option<String>,
    /// Pinning API secret; the PINATA_SECRET_API_KEY env var takes precedence
    pub pinning_secret_api_key: Option<String>,
    /// Known networks by name
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            "localhost".to_string(),
            NetworkConfig {
                rpc_url: "http://127.0.0.1:8545".to_string(),
                chain_id: 1337,
            },
        );
        networks.insert(
            "mainnet".to_string(),
            NetworkConfig {
                rpc_url: "https://ethereum.publicnode.com".to_string(),
                chain_id: 1,
            },
        );
        networks.insert(
            "sepolia".to_string(),
            NetworkConfig {
                rpc_url: "https://rpc.sepolia.org".to_string(),
                chain_id: 11155111,
            },
        );
        networks.insert(
            "base-mainnet".to_string(),
            NetworkConfig {
                rpc_url: "https://mainnet.base.org".to_string(),
                chain_id: 8453,
            },
        );
        networks.insert(
            "base-sepolia".to_string(),
            NetworkConfig {
                rpc_url: "https://sepolia.base.org".to_string(),
                chain_id: 84532,
            },
        );

        Self {
            default_network: "localhost".to_string(),
            contract_address: None,
            gateway_url: "https://gateway.pinata.cloud/ipfs/".to_string(),
            pinning_api_url: "https://api.pinata.cloud".to_string(),
            pinning_api_key: None,
            pinning_secret_api_key: None,
            networks,
        }
    }
}

impl CliConfig {
    /// Load configuration from file.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".editionmint").join("config.toml"))
    }

    /// Resolve a network by name, defaulting to `default_network`.
    pub fn network(&self, name: Option<&str>) -> anyhow::Result<(String, NetworkConfig)> {
        let name = name.unwrap_or(&self.default_network);
        let network = self.networks.get(name).with_context(|| {
            format!(
                "Unknown network '{}'; known networks: {}",
                name,
                self.networks.keys().cloned().collect::<Vec<_>>().join(", ")
            )
        })?;
        Ok((name.to_string(), network.clone()))
    }

    /// Resolve pinning credentials; environment variables win over the file.
    pub fn pinning_credentials(&self) -> anyhow::Result<(String, String)> {
        let key = std::env::var("PINATA_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.pinning_api_key.clone())
            .context("No pinning API key; set PINATA_API_KEY or run: editionmint config set pinning_api_key <key>")?;
        let secret = std::env::var("PINATA_SECRET_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.pinning_secret_api_key.clone())
            .context("No pinning API secret; set PINATA_SECRET_API_KEY or run: editionmint config set pinning_secret_api_key <secret>")?;
        Ok((key, secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.default_network, "localhost");
        assert_eq!(config.networks["localhost"].rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.networks["base-mainnet"].chain_id, 8453);
        assert!(config.contract_address.is_none());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = CliConfig::default();
        config.contract_address = Some("0x07f6b926ecb7cb8d2908928db7b66b53cea7745b".to_string());
        config.default_network = "base-sepolia".to_string();

        let toml_str = toml::to_string(&config).unwrap();
        let back: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.default_network, "base-sepolia");
        assert_eq!(
            back.contract_address.as_deref(),
            Some("0x07f6b926ecb7cb8d2908928db7b66b53cea7745b")
        );
        assert_eq!(back.networks.len(), config.networks.len());
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        let config = CliConfig::default();
        assert!(config.network(Some("testnet-nine")).is_err());
        let (name, network) = config.network(None).unwrap();
        assert_eq!(name, "localhost");
        assert_eq!(network.chain_id, 1337);
    }
}
