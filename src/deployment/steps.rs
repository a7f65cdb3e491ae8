pub mod nft_market;
pub mod proxy;
pub mod staking;
pub mod upgrade;
