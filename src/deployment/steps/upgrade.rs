use ethers::types::{Address, Bytes, H256};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::abis::{ProxyAdmin, UupsUpgradeable};
use crate::cli::UpgradeProxyArgs;
use crate::deployment::DeploymentContext;
use crate::ethers_utils::{
    encode_call, ensure_has_code, read_address_slot, send_call, ADMIN_SLOT,
    IMPLEMENTATION_SLOT,
};
use crate::report::contract_deployment::ContractDeployment;
use crate::types::ProxyKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub proxy: Address,
    pub kind: ProxyKind,
    pub previous_implementation: Address,
    pub implementation: ContractDeployment,
    pub transaction_hash: H256,
}

fn ensure_proxied(proxy: Address, implementation: Address) -> eyre::Result<()> {
    if implementation.is_zero() {
        eyre::bail!("{proxy:?} is not an EIP-1967 proxy");
    }

    Ok(())
}

fn ensure_admin(proxy: Address, admin: Address) -> eyre::Result<()> {
    if admin.is_zero() {
        eyre::bail!("Proxy {proxy:?} has no admin, is it a UUPS proxy?");
    }

    Ok(())
}

fn ensure_upgraded(
    proxy: Address,
    expected: Address,
    current: Address,
) -> eyre::Result<()> {
    if current != expected {
        eyre::bail!(
            "Upgrade of {proxy:?} did not take effect, implementation is still {current:?}"
        );
    }

    Ok(())
}

#[instrument(skip_all)]
async fn upgrade_call_data(
    context: &DeploymentContext,
    args: &UpgradeProxyArgs,
) -> eyre::Result<Bytes> {
    let Some(function) = args.call.as_deref() else {
        return Ok(Bytes::new());
    };

    let abi = context.inspect_abi(args.contract.clone()).run().await?;

    encode_call(&abi, function, &args.call_args)
}

#[instrument(skip(context, call_data))]
async fn point_proxy_at(
    context: &DeploymentContext,
    kind: ProxyKind,
    proxy: Address,
    implementation: Address,
    call_data: Bytes,
) -> eyre::Result<H256> {
    let client = context.rpc_signer.0.clone();

    let receipt = match kind {
        ProxyKind::Transparent => {
            let admin =
                read_address_slot(&context.rpc_signer, proxy, ADMIN_SLOT)
                    .await?;

            ensure_admin(proxy, admin)?;

            info!("Upgrading through proxy admin {admin:?}");

            let proxy_admin = ProxyAdmin::new(admin, client);

            send_call(
                context,
                proxy_admin.upgrade_and_call(proxy, implementation, call_data),
            )
            .await?
        }
        ProxyKind::Uups => {
            let upgradeable = UupsUpgradeable::new(proxy, client);

            send_call(
                context,
                upgradeable.upgrade_to_and_call(implementation, call_data),
            )
            .await?
        }
    };

    Ok(receipt.transaction_hash)
}

#[instrument(name = "upgrade_proxy", skip_all, fields(proxy = ?args.proxy))]
pub async fn upgrade(
    context: &DeploymentContext,
    args: &UpgradeProxyArgs,
) -> eyre::Result<UpgradeRecord> {
    ensure_has_code(&context.rpc_signer, args.proxy).await?;

    let previous_implementation = read_address_slot(
        &context.rpc_signer,
        args.proxy,
        IMPLEMENTATION_SLOT,
    )
    .await?;

    ensure_proxied(args.proxy, previous_implementation)?;

    info!("Current implementation is {previous_implementation:?}");

    let call_data = upgrade_call_data(context, args).await?;

    let implementation = context
        .create(context.forge_create(args.contract.clone()))
        .await?;

    let transaction_hash = point_proxy_at(
        context,
        args.kind,
        args.proxy,
        implementation.address,
        call_data,
    )
    .await?;

    let current_implementation = read_address_slot(
        &context.rpc_signer,
        args.proxy,
        IMPLEMENTATION_SLOT,
    )
    .await?;

    ensure_upgraded(
        args.proxy,
        implementation.address,
        current_implementation,
    )?;

    let record = UpgradeRecord {
        proxy: args.proxy,
        kind: args.kind,
        previous_implementation,
        implementation,
        transaction_hash,
    };

    context
        .update_report(|report| report.upgrades.push(record.clone()))
        .await?;

    if let Some(explorer) = context.network.explorer.as_ref() {
        info!("Upgraded proxy: {}", explorer.address_url(args.proxy));
    }

    println!(
        "Your upgraded proxy is done! {}",
        ethers::utils::to_checksum(&args.proxy, None)
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use ethers::types::H160;

    use super::*;

    const PROXY: Address = H160([0x02; 20]);

    #[test]
    fn zero_implementation_is_not_a_proxy() {
        let err = ensure_proxied(PROXY, Address::zero()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "0x0202020202020202020202020202020202020202 is not an EIP-1967 proxy"
        );
        assert!(ensure_proxied(PROXY, Address::repeat_byte(0x01)).is_ok());
    }

    #[test]
    fn transparent_upgrade_needs_an_admin() {
        let err = ensure_admin(PROXY, Address::zero()).unwrap_err();

        assert!(err.to_string().ends_with("has no admin, is it a UUPS proxy?"));
        assert!(ensure_admin(PROXY, Address::repeat_byte(0x03)).is_ok());
    }

    #[test]
    fn unchanged_implementation_fails_the_upgrade() {
        let old = Address::repeat_byte(0x01);
        let new = Address::repeat_byte(0x04);

        let err = ensure_upgraded(PROXY, new, old).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Upgrade of 0x0202020202020202020202020202020202020202 did not take effect, \
             implementation is still 0x0101010101010101010101010101010101010101"
        );

        assert!(ensure_upgraded(PROXY, new, new).is_ok());
    }
}
