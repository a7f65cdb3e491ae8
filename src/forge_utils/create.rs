use std::path::{Path, PathBuf};

use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::ContractSpec;
use super::strip_non_json;
use crate::cli::PrivateKey;

#[derive(Debug)]
pub struct ForgeCreate {
    cwd: Option<PathBuf>,
    contract_spec: ContractSpec,
    private_key: Option<PrivateKey>,
    rpc_url: Option<String>,
    override_nonce: Option<u64>,
    constructor_args: Vec<String>,
    verification_args: ForgeCreateVerificationArgs,
    no_verify: bool,
}

#[derive(Debug, Default)]
pub struct ForgeCreateVerificationArgs {
    pub verification_api_key: Option<String>,
    pub verifier_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeOutput {
    pub deployer: Address,
    pub deployed_to: Address,
    pub transaction_hash: H256,
}

impl ForgeCreate {
    pub fn new(contract_spec: ContractSpec) -> Self {
        Self {
            cwd: None,
            contract_spec,
            override_nonce: None,
            private_key: None,
            rpc_url: None,
            constructor_args: vec![],
            verification_args: ForgeCreateVerificationArgs::default(),
            no_verify: false,
        }
    }

    pub fn no_verify(mut self) -> Self {
        self.no_verify = true;
        self
    }

    pub fn with_verification_api_key(
        mut self,
        verification_api_key: impl ToString,
    ) -> Self {
        self.verification_args.verification_api_key =
            Some(verification_api_key.to_string());
        self
    }

    pub fn with_verifier_url(mut self, verifier_url: impl ToString) -> Self {
        self.verification_args.verifier_url = Some(verifier_url.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    pub fn with_override_nonce(mut self, override_nonce: u64) -> Self {
        self.override_nonce = Some(override_nonce);
        self
    }

    pub fn with_private_key(mut self, private_key: PrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: String) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    pub fn with_constructor_arg(mut self, arg: impl ToString) -> Self {
        self.constructor_args.push(arg.to_string());
        self
    }

    pub fn contract_spec(&self) -> &ContractSpec {
        &self.contract_spec
    }

    pub fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new("forge");
        cmd.arg("create");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.arg(self.contract_spec.to_string());

        if let Some(private_key) = &self.private_key {
            cmd.arg("--private-key");
            cmd.arg(format!("{private_key:#}"));
        }

        if let Some(rpc_url) = &self.rpc_url {
            cmd.arg("--rpc-url");
            cmd.arg(rpc_url);
        }

        if let Some(nonce) = self.override_nonce {
            cmd.arg("--nonce");
            cmd.arg(nonce.to_string());
        }

        if !self.no_verify {
            if let Some(verification_api_key) =
                &self.verification_args.verification_api_key
            {
                cmd.arg("--etherscan-api-key");
                cmd.arg(verification_api_key);

                if let Some(verifier_url) = &self.verification_args.verifier_url
                {
                    cmd.arg("--verifier-url");
                    cmd.arg(verifier_url);
                }

                cmd.arg("--verify");
            }
        }

        cmd.arg("--broadcast");
        cmd.arg("--json");

        // Takes any number of values so it has to come last
        if !self.constructor_args.is_empty() {
            cmd.arg("--constructor-args");
            cmd.args(&self.constructor_args);
        }

        cmd
    }

    #[instrument(name = "forge_create", skip_all, fields(contract = %self.contract_spec))]
    pub async fn run(&self) -> eyre::Result<ForgeOutput> {
        let mut cmd = self.command();

        info!(
            nonce = ?self.override_nonce,
            constructor_args = ?self.constructor_args,
            "Creating contract"
        );

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge create failed: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let s = strip_non_json(&stdout);

        let output: ForgeOutput = serde_json::from_str(s)?;

        info!("Created: {output:?}");

        Ok(output)
    }
}
