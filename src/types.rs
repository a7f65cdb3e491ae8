use std::str::FromStr;

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use strum::Display;

macro_rules! impl_primitive_num {
    (pub struct $outer:ident($tname:ty)) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Serialize,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deserialize,
            Shrinkwrap,
        )]
        pub struct $outer(pub $tname);

        impl std::fmt::Display for $outer {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

impl_primitive_num!(pub struct ChainId(u64));

/// An amount given in ether on the command line, held in wei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Shrinkwrap)]
pub struct EtherAmount(pub U256);

impl FromStr for EtherAmount {
    type Err = ethers::utils::ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ethers::utils::parse_ether(s.trim()).map(Self)
    }
}

/// Which upgradeable proxy layout a contract is deployed behind
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProxyKind {
    /// Upgrades go through a `ProxyAdmin` owned by the deployer
    Transparent,
    /// Upgrades are implemented by the implementation contract itself
    Uups,
}

impl ProxyKind {
    /// The proxy contract created in front of the implementation
    pub fn proxy_contract(&self) -> &'static str {
        match self {
            ProxyKind::Transparent => "TransparentUpgradeableProxy",
            ProxyKind::Uups => "ERC1967Proxy",
        }
    }
}
