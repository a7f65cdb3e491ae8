use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cli::StakingArgs;
use crate::deployment::DeploymentContext;
use crate::forge_utils::ContractSpec;
use crate::report::contract_deployment::ContractDeployment;

const TOKEN_CONTRACT: &str = "ERC20";
const TOKEN_ICO_CONTRACT: &str = "TokenICO";
const STAKING_DAPP_CONTRACT: &str = "StackingDapp";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StakingDeployment {
    #[serde(default)]
    pub token: Option<ContractDeployment>,
    #[serde(default)]
    pub token_ico: Option<ContractDeployment>,
    #[serde(default)]
    pub staking_dapp: Option<ContractDeployment>,
}

#[instrument(skip_all)]
async fn deploy_token(
    context: &DeploymentContext,
    args: &StakingArgs,
) -> eyre::Result<ContractDeployment> {
    context
        .create_or_reuse(
            |report| &mut report.staking.token,
            ContractSpec::name(TOKEN_CONTRACT),
            vec![args.token_name.clone(), args.token_symbol.clone()],
        )
        .await
}

#[instrument(skip_all)]
async fn deploy_token_ico(
    context: &DeploymentContext,
    args: &StakingArgs,
    token: &ContractDeployment,
) -> eyre::Result<ContractDeployment> {
    context
        .create_or_reuse(
            |report| &mut report.staking.token_ico,
            ContractSpec::name(TOKEN_ICO_CONTRACT),
            // Token price is passed in wei
            vec![
                format!("{:?}", token.address),
                args.token_price.0.to_string(),
            ],
        )
        .await
}

#[instrument(skip_all)]
async fn deploy_staking_dapp(
    context: &DeploymentContext,
) -> eyre::Result<ContractDeployment> {
    context
        .create_or_reuse(
            |report| &mut report.staking.staking_dapp,
            ContractSpec::name(STAKING_DAPP_CONTRACT),
            vec![],
        )
        .await
}

#[instrument(name = "staking", skip_all)]
pub async fn deploy(
    context: &DeploymentContext,
    args: &StakingArgs,
) -> eyre::Result<StakingDeployment> {
    let token = deploy_token(context, args).await?;
    context.print_deployed("ERC20 Token", token.address);

    let token_ico = deploy_token_ico(context, args, &token).await?;
    context.print_deployed("TokenICO", token_ico.address);

    let staking_dapp = deploy_staking_dapp(context).await?;
    context.print_deployed("StackingDapp", staking_dapp.address);

    Ok(StakingDeployment {
        token: Some(token),
        token_ico: Some(token_ico),
        staking_dapp: Some(staking_dapp),
    })
}
