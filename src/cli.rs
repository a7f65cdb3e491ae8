use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ethers::types::Address;

pub mod private_key;

pub use private_key::PrivateKey;
use reqwest::Url;

use crate::forge_utils::ContractSpec;
use crate::types::{EtherAmount, ProxyKind};

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case", version, about)]
pub struct Args {
    /// Private key of the deployer
    #[clap(short, long, env)]
    pub private_key: PrivateKey,

    /// The RPC Url to use for the deployment
    #[clap(short, long, env)]
    pub rpc_url: Url,

    /// The etherscan API key to use
    ///
    /// When set, every created contract is also verified on the network's explorer
    #[clap(short, long, env)]
    pub etherscan_api_key: Option<String>,

    /// Path to a network configuration file
    #[clap(short, long, env)]
    pub config: Option<PathBuf>,

    /// Name of the network to deploy to, as listed in the configuration
    #[clap(short, long, env)]
    pub network: Option<String>,

    /// The name of the deployment
    ///
    /// The deployment report is kept in a directory of that name
    #[clap(short, long, env, default_value = "deployment")]
    pub deployment_name: String,

    /// Root of the forge project holding the contracts
    #[clap(long, env, default_value = ".")]
    pub contracts_dir: PathBuf,

    /// Ask for confirmation before sending any transaction
    #[clap(long, env)]
    pub confirm: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Deploy the token, the token sale and the staking contracts
    Staking(StakingArgs),
    /// Deploy the NFT marketplace lock contract
    NftMarket,
    /// Deploy an upgradeable contract behind a proxy
    DeployProxy(DeployProxyArgs),
    /// Point an existing proxy at a new implementation
    UpgradeProxy(UpgradeProxyArgs),
}

#[derive(Debug, Clone, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct StakingArgs {
    #[clap(long, default_value = "MyToken")]
    pub token_name: String,

    #[clap(long, default_value = "MTK")]
    pub token_symbol: String,

    /// Price of a single token in the sale, in ether
    #[clap(long, default_value = "0.01")]
    pub token_price: EtherAmount,
}

#[derive(Debug, Clone, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct DeployProxyArgs {
    /// Implementation contract, as `Name` or `path:Name`
    #[clap(long, default_value = "Meinkampf")]
    pub contract: ContractSpec,

    #[clap(long, default_value = "transparent")]
    pub kind: ProxyKind,

    /// Function called through the proxy on creation
    #[clap(long, default_value = "store")]
    pub initializer: String,

    #[clap(long, value_delimiter = ',', default_value = "42")]
    pub initializer_args: Vec<String>,

    /// Create the proxy without calling an initializer
    #[clap(long)]
    pub no_initializer: bool,

    /// Owner of the proxy admin, defaults to the deployer
    #[clap(long)]
    pub owner: Option<Address>,
}

#[derive(Debug, Clone, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct UpgradeProxyArgs {
    /// Address of the proxy to upgrade
    #[clap(long, env = "PROXY")]
    pub proxy: Address,

    /// New implementation contract, as `Name` or `path:Name`
    #[clap(long, default_value = "MeinkampfV2")]
    pub contract: ContractSpec,

    #[clap(long, default_value = "transparent")]
    pub kind: ProxyKind,

    /// Function of the new implementation to call along with the upgrade
    #[clap(long)]
    pub call: Option<String>,

    #[clap(long, value_delimiter = ',', requires = "call")]
    pub call_args: Vec<String>,
}
