use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::deployment::DeploymentContext;
use crate::forge_utils::ContractSpec;
use crate::report::contract_deployment::ContractDeployment;

const LOCK_CONTRACT: &str = "Lock";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NftMarketDeployment {
    #[serde(default)]
    pub lock: Option<ContractDeployment>,
}

#[instrument(name = "nft_market", skip_all)]
pub async fn deploy(
    context: &DeploymentContext,
) -> eyre::Result<NftMarketDeployment> {
    let lock = context
        .create_or_reuse(
            |report| &mut report.nft_market.lock,
            ContractSpec::name(LOCK_CONTRACT),
            vec![],
        )
        .await?;

    context.print_deployed(LOCK_CONTRACT, lock.address);

    Ok(NftMarketDeployment { lock: Some(lock) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::deployment_context::test_utils::{
        offline_context, recorded,
    };
    use crate::report::Report;
    use crate::types::ChainId;

    #[tokio::test]
    async fn rerun_reuses_lock() {
        let dir = tempfile::tempdir().unwrap();
        let lock = recorded(0x01, LOCK_CONTRACT, &[]);

        let mut report = Report::new("holesky", ChainId(17000));
        report.nft_market.lock = Some(lock.clone());

        let context = offline_context(dir.path(), report);

        let deployment = deploy(&context).await.unwrap();

        assert_eq!(deployment.lock, Some(lock));
    }

    #[tokio::test]
    async fn lock_recorded_from_another_contract_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let mut report = Report::new("holesky", ChainId(17000));
        report.nft_market.lock = Some(recorded(0x01, "src/Lock.sol:Lock", &[]));

        let context = offline_context(dir.path(), report);

        assert!(deploy(&context).await.is_err());
    }
}
