use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use ethers::prelude::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::Signer;
use ethers::types::BlockNumber;
use eyre::WrapErr;
use tokio::sync::Mutex;
use tracing::info;

use self::steps::{nft_market, proxy, staking, upgrade};
use crate::cli::{Args, Command};
use crate::common_keys::RpcSigner;
use crate::config::Config;
use crate::report::Report;
use crate::types::ChainId;
use crate::{interactive, serde_utils};

pub mod deployment_context;
pub mod steps;

pub const REPORT_PATH: &str = "report.yml";

pub use self::deployment_context::DeploymentContext;

pub async fn run_deployment(args: Args) -> eyre::Result<()> {
    let config: Config = match args.config.as_ref() {
        Some(path) => serde_utils::read_deserialize(path).await?,
        None => Config::default(),
    };

    let (network_name, network) = config.network(args.network.as_deref())?;

    let provider = Provider::<Http>::try_from(args.rpc_url.as_str())?;
    let chain_id = provider
        .get_chainid()
        .await
        .wrap_err_with(|| format!("Connecting to {}", args.rpc_url))?;
    let chain_id = ChainId(chain_id.as_u64());

    if chain_id != network.chain_id {
        eyre::bail!(
            "RPC endpoint is on chain {chain_id} but network {network_name} expects chain {}",
            network.chain_id
        );
    }

    let wallet = args.private_key.wallet().with_chain_id(chain_id.0);

    let wallet_address = wallet.address();

    let signer = SignerMiddleware::new(provider, wallet);

    let nonce = signer
        .get_transaction_count(
            wallet_address,
            Some(BlockNumber::Pending.into()),
        )
        .await?;

    info!("Deploying from {wallet_address:?} on {network_name} with nonce {nonce}");

    let deployment_dir = PathBuf::from(&args.deployment_name);
    tokio::fs::create_dir_all(&deployment_dir).await?;

    let report_path = deployment_dir.join(REPORT_PATH);
    let report: Report = if report_path.exists() {
        let report: Report = serde_utils::read_deserialize(&report_path).await?;
        report.ensure_chain(chain_id)?;
        report
    } else {
        Report::new(network_name, chain_id)
    };

    let context = DeploymentContext {
        deployment_dir,
        contracts_dir: args.contracts_dir,
        network_name: network_name.to_string(),
        network: network.clone(),
        nonce: AtomicU64::new(nonce.as_u64()),
        report: Mutex::new(report),
        private_key: args.private_key,
        rpc_url: args.rpc_url,
        rpc_signer: RpcSigner(Arc::new(signer)),
        etherscan_api_key: args.etherscan_api_key,
    };

    if args.confirm && !interactive::confirm_deployment(&context, &args.command)? {
        info!("Deployment cancelled");
        return Ok(());
    }

    match &args.command {
        Command::Staking(staking_args) => {
            staking::deploy(&context, staking_args).await?;
        }
        Command::NftMarket => {
            nft_market::deploy(&context).await?;
        }
        Command::DeployProxy(proxy_args) => {
            proxy::deploy(&context, proxy_args).await?;
        }
        Command::UpgradeProxy(upgrade_args) => {
            upgrade::upgrade(&context, upgrade_args).await?;
        }
    }

    Ok(())
}
