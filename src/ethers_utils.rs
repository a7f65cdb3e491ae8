use ethers::abi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{Abi, Detokenize, Token};
use ethers::contract::ContractCall;
use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, TransactionReceipt, H256};
use eyre::{bail, ContextCompat, WrapErr};
use hex_literal::hex;
use tracing::info;

use crate::common_keys::{RpcSigner, SignerClient};
use crate::deployment::DeploymentContext;

/// `keccak256("eip1967.proxy.implementation") - 1`
pub const IMPLEMENTATION_SLOT: H256 = H256(hex!(
    "360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc"
));

/// `keccak256("eip1967.proxy.admin") - 1`
pub const ADMIN_SLOT: H256 = H256(hex!(
    "b53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103"
));

/// Addresses are stored right aligned in a 32 byte slot
pub fn address_from_slot(value: H256) -> Address {
    Address::from_slice(&value.as_bytes()[12..])
}

pub async fn read_address_slot(
    signer: &RpcSigner,
    contract: Address,
    slot: H256,
) -> eyre::Result<Address> {
    let value = signer
        .0
        .get_storage_at(contract, slot, None)
        .await
        .wrap_err_with(|| format!("Reading slot {slot:?} of {contract:?}"))?;

    Ok(address_from_slot(value))
}

pub async fn ensure_has_code(
    signer: &RpcSigner,
    address: Address,
) -> eyre::Result<()> {
    let code = signer
        .0
        .get_code(address, None)
        .await
        .wrap_err_with(|| format!("Fetching code at {address:?}"))?;

    ensure_code_present(address, &code)
}

pub fn ensure_code_present(
    address: Address,
    code: &Bytes,
) -> eyre::Result<()> {
    if code.is_empty() {
        bail!("No contract deployed at {address:?}");
    }

    Ok(())
}

/// Encodes a call to `function_name`, parsing each argument according to the
/// matching overload's parameter types
pub fn encode_call(
    abi: &Abi,
    function_name: &str,
    args: &[String],
) -> eyre::Result<Bytes> {
    let overloads = abi
        .functions_by_name(function_name)
        .wrap_err_with(|| format!("Missing function {function_name} in abi"))?;

    let function = overloads
        .iter()
        .find(|function| function.inputs.len() == args.len())
        .with_context(|| {
            format!(
                "No overload of {function_name} takes {} arguments",
                args.len()
            )
        })?;

    let tokens = function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            LenientTokenizer::tokenize(&param.kind, arg).wrap_err_with(|| {
                format!("Parsing {arg} as {} for {}", param.kind, param.name)
            })
        })
        .collect::<eyre::Result<Vec<Token>>>()?;

    let data = function.encode_input(&tokens)?;

    Ok(data.into())
}

/// Sends a contract call using the next locally tracked nonce and waits for
/// a successful receipt
pub async fn send_call<D>(
    context: &DeploymentContext,
    call: ContractCall<SignerClient, D>,
) -> eyre::Result<TransactionReceipt>
where
    D: Detokenize,
{
    let call = call.nonce(context.next_nonce());

    let tx = call.send().await.wrap_err("Send transaction")?;

    info!("Sent transaction {:?}", tx.tx_hash());

    let receipt = tx
        .await
        .wrap_err("Awaiting receipt")?
        .context("Failed to execute")?;

    if receipt.status != Some(1.into()) {
        bail!("Transaction {:?} failed!", receipt.transaction_hash);
    }

    Ok(receipt)
}
