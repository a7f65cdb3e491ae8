use std::path::PathBuf;
use std::sync::atomic::AtomicU64;

use ethers::types::Address;
use reqwest::Url;
use tokio::sync::Mutex;
use tracing::info;

use super::REPORT_PATH;
use crate::cli::PrivateKey;
use crate::common_keys::RpcSigner;
use crate::config::NetworkConfig;
use crate::forge_utils::{ContractSpec, ForgeCreate, ForgeInspectAbi};
use crate::report::contract_deployment::ContractDeployment;
use crate::report::Report;
use crate::serde_utils;

#[derive(Debug)]
pub struct DeploymentContext {
    pub deployment_dir: PathBuf,
    pub contracts_dir: PathBuf,
    pub network_name: String,
    pub network: NetworkConfig,
    pub nonce: AtomicU64,
    pub report: Mutex<Report>,
    pub private_key: PrivateKey,
    pub rpc_url: Url,
    pub rpc_signer: RpcSigner,
    pub etherscan_api_key: Option<String>,
}

impl DeploymentContext {
    pub fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }

    pub fn report_path(&self) -> PathBuf {
        self.deployment_dir.join(REPORT_PATH)
    }

    pub fn forge_create(&self, contract_spec: ContractSpec) -> ForgeCreate {
        let mut forge_create = ForgeCreate::new(contract_spec)
            .with_cwd(&self.contracts_dir)
            .with_private_key(self.private_key.clone())
            .with_rpc_url(self.rpc_url.to_string())
            .with_override_nonce(self.next_nonce());

        if let Some(etherscan_api_key) = self.etherscan_api_key.as_ref() {
            forge_create = forge_create
                .with_verification_api_key(etherscan_api_key.clone());

            if let Some(explorer) = self.network.explorer.as_ref() {
                forge_create =
                    forge_create.with_verifier_url(&explorer.api_url);
            }
        }

        forge_create
    }

    pub fn inspect_abi(&self, contract_spec: ContractSpec) -> ForgeInspectAbi {
        ForgeInspectAbi::new(contract_spec).with_cwd(&self.contracts_dir)
    }

    /// Applies `update` to the report and persists it
    pub async fn update_report(
        &self,
        update: impl FnOnce(&mut Report),
    ) -> eyre::Result<()> {
        let mut report = self.report.lock().await;

        update(&mut report);

        serde_utils::write_serialize(self.report_path(), &*report).await
    }

    /// Runs `forge_create` and records what it was created from
    pub async fn create(
        &self,
        forge_create: ForgeCreate,
    ) -> eyre::Result<ContractDeployment> {
        let output = forge_create.run().await?;

        Ok(ContractDeployment::new(&forge_create, output))
    }

    /// Returns the deployment recorded in `slot`, creating the contract first
    /// if the report has none
    ///
    /// A recorded deployment is only reused if it was created from the same
    /// contract and constructor arguments.
    pub async fn create_or_reuse<S>(
        &self,
        slot: S,
        contract_spec: ContractSpec,
        constructor_args: Vec<String>,
    ) -> eyre::Result<ContractDeployment>
    where
        S: Fn(&mut Report) -> &mut Option<ContractDeployment>,
    {
        let existing = {
            let mut report = self.report.lock().await;
            slot(&mut *report).clone()
        };

        if let Some(existing) = existing {
            existing.ensure_created_from(&contract_spec, &constructor_args)?;

            info!(
                "Existing {contract_spec} deployment found at {:?}. Skipping.",
                existing.address
            );
            return Ok(existing);
        }

        let forge_create = constructor_args
            .into_iter()
            .fold(self.forge_create(contract_spec), |forge_create, arg| {
                forge_create.with_constructor_arg(arg)
            });

        let deployment = self.create(forge_create).await?;

        self.update_report(|report| {
            *slot(report) = Some(deployment.clone());
        })
        .await?;

        Ok(deployment)
    }

    pub fn print_deployed(&self, label: &str, address: Address) {
        println!(
            "{label} deployed to: {}",
            ethers::utils::to_checksum(&address, None)
        );

        if let Some(explorer) = self.network.explorer.as_ref() {
            info!("{label}: {}", explorer.address_url(address));
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::test_utils::{offline_context, recorded};
    use super::*;
    use crate::types::ChainId;

    fn report_with_lock(lock: ContractDeployment) -> Report {
        let mut report = Report::new("holesky", ChainId(17000));
        report.nft_market.lock = Some(lock);
        report
    }

    #[tokio::test]
    async fn reuses_recorded_contract() {
        let dir = tempfile::tempdir().unwrap();
        let lock = recorded(0x01, "Lock", &[]);
        let context =
            offline_context(dir.path(), report_with_lock(lock.clone()));

        let deployment = context
            .create_or_reuse(
                |report| &mut report.nft_market.lock,
                ContractSpec::name("Lock"),
                vec![],
            )
            .await
            .unwrap();

        assert_eq!(deployment, lock);
        // Nothing was sent so no nonce was handed out
        assert_eq!(context.nonce.load(Ordering::SeqCst), 0);
        assert!(!context.report_path().exists());
    }

    #[tokio::test]
    async fn refuses_to_reuse_contract_created_differently() {
        let dir = tempfile::tempdir().unwrap();
        let context = offline_context(
            dir.path(),
            report_with_lock(recorded(0x01, "Lock", &[])),
        );

        let err = context
            .create_or_reuse(
                |report| &mut report.nft_market.lock,
                ContractSpec::name("Lock"),
                vec!["1".to_string()],
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("was deployed with arguments []"));
        assert_eq!(context.nonce.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_contract_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let context =
            offline_context(dir.path(), Report::new("holesky", ChainId(17000)));

        // The contracts directory does not exist so forge cannot even start
        let result = context
            .create_or_reuse(
                |report| &mut report.nft_market.lock,
                ContractSpec::name("Lock"),
                vec![],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(context.nonce.load(Ordering::SeqCst), 1);
        assert!(context.report.lock().await.nft_market.lock.is_none());
    }
}
