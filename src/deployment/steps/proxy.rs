use ethers::types::{Address, Bytes};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::cli::DeployProxyArgs;
use crate::deployment::DeploymentContext;
use crate::ethers_utils::{
    encode_call, read_address_slot, ADMIN_SLOT, IMPLEMENTATION_SLOT,
};
use crate::forge_utils::ContractSpec;
use crate::report::contract_deployment::ContractDeployment;
use crate::types::ProxyKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProxyDeployment {
    pub kind: ProxyKind,
    pub implementation: ContractDeployment,
    pub proxy: ContractDeployment,
    /// Function called through the proxy on creation
    #[serde(default)]
    pub initializer: Option<InitializerCall>,
    /// Owner of the `ProxyAdmin` created by a transparent proxy
    #[serde(default)]
    pub owner: Option<Address>,
    #[serde(default)]
    pub admin: Option<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerCall {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl InitializerCall {
    fn requested(args: &DeployProxyArgs) -> Option<Self> {
        (!args.no_initializer).then(|| Self {
            function: args.initializer.clone(),
            args: args.initializer_args.clone(),
        })
    }
}

impl std::fmt::Display for InitializerCall {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({})", self.function, self.args.join(", "))
    }
}

fn owner_of(kind: ProxyKind, owner: Address) -> Option<Address> {
    match kind {
        ProxyKind::Transparent => Some(owner),
        ProxyKind::Uups => None,
    }
}

impl ProxyDeployment {
    /// Fails unless the recorded proxy matches what `args` ask for
    pub fn ensure_requested_by(
        &self,
        args: &DeployProxyArgs,
        owner: Address,
    ) -> eyre::Result<()> {
        let address = self.proxy.address;

        if self.kind != args.kind {
            eyre::bail!(
                "Proxy at {address:?} is recorded as a {} proxy, not {}",
                self.kind,
                args.kind
            );
        }

        self.implementation
            .ensure_created_from(&args.contract, &[])
            .wrap_err_with(|| format!("Implementation of proxy {address:?}"))?;

        let initializer = InitializerCall::requested(args);
        if self.initializer != initializer {
            eyre::bail!(
                "Proxy at {address:?} was initialized with {}, not {}",
                describe_initializer(self.initializer.as_ref()),
                describe_initializer(initializer.as_ref())
            );
        }

        let owner = owner_of(args.kind, owner);
        if self.owner != owner {
            eyre::bail!(
                "Proxy at {address:?} is owned by {:?}, not {:?}",
                self.owner,
                owner
            );
        }

        Ok(())
    }
}

fn describe_initializer(initializer: Option<&InitializerCall>) -> String {
    initializer.map_or_else(|| "no initializer".to_string(), ToString::to_string)
}

#[instrument(skip_all)]
async fn initializer_call_data(
    context: &DeploymentContext,
    args: &DeployProxyArgs,
) -> eyre::Result<Bytes> {
    if args.no_initializer {
        return Ok(Bytes::new());
    }

    let abi = context.inspect_abi(args.contract.clone()).run().await?;

    encode_call(&abi, &args.initializer, &args.initializer_args)
}

#[instrument(skip(context))]
async fn deploy_proxy_contract(
    context: &DeploymentContext,
    kind: ProxyKind,
    implementation: Address,
    owner: Address,
    call_data: &Bytes,
) -> eyre::Result<ContractDeployment> {
    let mut forge_create = context
        .forge_create(ContractSpec::name(kind.proxy_contract()))
        .no_verify()
        .with_constructor_arg(format!("{implementation:?}"));

    if kind == ProxyKind::Transparent {
        forge_create = forge_create.with_constructor_arg(format!("{owner:?}"));
    }

    context
        .create(forge_create.with_constructor_arg(call_data))
        .await
}

#[instrument(name = "deploy_proxy", skip_all)]
pub async fn deploy(
    context: &DeploymentContext,
    args: &DeployProxyArgs,
) -> eyre::Result<ProxyDeployment> {
    let owner = args.owner.unwrap_or_else(|| context.rpc_signer.address());

    let previous_deployment = context.report.lock().await.proxy.clone();

    if let Some(previous_deployment) = previous_deployment {
        previous_deployment.ensure_requested_by(args, owner)?;

        info!(
            "Existing {} proxy deployment found at {:?}. Skipping.",
            previous_deployment.kind, previous_deployment.proxy.address
        );
        context.print_deployed("proxy", previous_deployment.proxy.address);
        return Ok(previous_deployment);
    }

    // Encoded up front so bad arguments fail before anything is sent
    let call_data = initializer_call_data(context, args).await?;

    let implementation = context
        .create(context.forge_create(args.contract.clone()))
        .await?;

    let proxy = deploy_proxy_contract(
        context,
        args.kind,
        implementation.address,
        owner,
        &call_data,
    )
    .await?;

    let proxied_implementation = read_address_slot(
        &context.rpc_signer,
        proxy.address,
        IMPLEMENTATION_SLOT,
    )
    .await?;

    if proxied_implementation != implementation.address {
        eyre::bail!(
            "Proxy {:?} points to {:?} instead of {:?}",
            proxy.address,
            proxied_implementation,
            implementation.address
        );
    }

    let admin = match args.kind {
        ProxyKind::Transparent => Some(
            read_address_slot(&context.rpc_signer, proxy.address, ADMIN_SLOT)
                .await?,
        ),
        ProxyKind::Uups => None,
    };

    let deployment = ProxyDeployment {
        kind: args.kind,
        implementation,
        proxy,
        initializer: InitializerCall::requested(args),
        owner: owner_of(args.kind, owner),
        admin,
    };

    context
        .update_report(|report| report.proxy = Some(deployment.clone()))
        .await?;

    info!(
        "Implementation {} deployed to {:?}",
        args.contract, deployment.implementation.address
    );
    if let Some(admin) = deployment.admin {
        info!("Proxy admin deployed to {admin:?}");
    }

    context.print_deployed("proxy", deployment.proxy.address);

    Ok(deployment)
}
