use serde::{Deserialize, Serialize};

use crate::deployment::steps::nft_market::NftMarketDeployment;
use crate::deployment::steps::proxy::ProxyDeployment;
use crate::deployment::steps::staking::StakingDeployment;
use crate::deployment::steps::upgrade::UpgradeRecord;
use crate::types::ChainId;

pub mod contract_deployment;

/// Everything deployed under one deployment name
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub network: String,
    pub chain_id: ChainId,

    #[serde(default)]
    pub staking: StakingDeployment,

    #[serde(default)]
    pub nft_market: NftMarketDeployment,

    #[serde(default)]
    pub proxy: Option<ProxyDeployment>,

    #[serde(default)]
    pub upgrades: Vec<UpgradeRecord>,
}

impl Report {
    pub fn new(network: impl ToString, chain_id: ChainId) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            staking: Default::default(),
            nft_market: Default::default(),
            proxy: Default::default(),
            upgrades: Default::default(),
        }
    }

    /// Reports can only be resumed on the chain they were produced for
    pub fn ensure_chain(&self, chain_id: ChainId) -> eyre::Result<()> {
        if self.chain_id != chain_id {
            eyre::bail!(
                "Existing report was produced for chain {} ({}), refusing to reuse it on chain {}",
                self.chain_id,
                self.network,
                chain_id
            );
        }

        Ok(())
    }
}
