use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

use crate::forge_utils::{ContractSpec, ForgeCreate, ForgeOutput};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContractDeployment {
    pub address: Address,
    /// Contract the deployment was created from, as passed to forge
    pub contract: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructor_args: Vec<String>,
    #[serde(default)]
    pub deployer: Option<Address>,
    #[serde(default)]
    pub transaction_hash: Option<H256>,
}

impl ContractDeployment {
    pub fn new(forge_create: &ForgeCreate, output: ForgeOutput) -> Self {
        Self {
            address: output.deployed_to,
            contract: forge_create.contract_spec().to_string(),
            constructor_args: forge_create.constructor_args().to_vec(),
            deployer: Some(output.deployer),
            transaction_hash: Some(output.transaction_hash),
        }
    }

    /// Fails unless the recorded deployment was created from `contract` with
    /// exactly `constructor_args`
    pub fn ensure_created_from(
        &self,
        contract: &ContractSpec,
        constructor_args: &[String],
    ) -> eyre::Result<()> {
        let contract = contract.to_string();

        if self.contract != contract {
            eyre::bail!(
                "Deployment at {:?} is recorded as {}, not {}. Use another deployment name to deploy {} again",
                self.address,
                self.contract,
                contract,
                contract
            );
        }

        if self.constructor_args != constructor_args {
            eyre::bail!(
                "{} at {:?} was deployed with arguments [{}], not [{}]. Use another deployment name to deploy it again",
                contract,
                self.address,
                self.constructor_args.join(", "),
                constructor_args.join(", ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> ContractDeployment {
        ContractDeployment {
            address: Address::from([0x01; 20]),
            contract: "ERC20".to_string(),
            constructor_args: vec!["MyToken".to_string(), "MTK".to_string()],
            deployer: None,
            transaction_hash: None,
        }
    }

    #[test]
    fn records_forge_inputs() {
        let forge_create = ForgeCreate::new(ContractSpec::name("ERC20"))
            .with_constructor_arg("MyToken")
            .with_constructor_arg("MTK");

        let output = ForgeOutput {
            deployer: Address::from([0x0a; 20]),
            deployed_to: Address::from([0x01; 20]),
            transaction_hash: H256::repeat_byte(0x0b),
        };

        let deployment = ContractDeployment::new(&forge_create, output);

        assert_eq!(
            deployment,
            ContractDeployment {
                deployer: Some(Address::from([0x0a; 20])),
                transaction_hash: Some(H256::repeat_byte(0x0b)),
                ..token()
            }
        );
    }

    #[test]
    fn accepts_same_inputs() {
        let args = ["MyToken".to_string(), "MTK".to_string()];

        assert!(token()
            .ensure_created_from(&ContractSpec::name("ERC20"), &args)
            .is_ok());
    }

    #[test]
    fn rejects_other_contract() {
        let err = token()
            .ensure_created_from(&ContractSpec::name("Lock"), &[])
            .unwrap_err();

        assert!(err.to_string().contains("recorded as ERC20, not Lock"));
    }

    #[test]
    fn rejects_other_constructor_args() {
        let args = ["OtherToken".to_string(), "MTK".to_string()];

        let err = token()
            .ensure_created_from(&ContractSpec::name("ERC20"), &args)
            .unwrap_err();

        assert!(err
            .to_string()
            .contains("deployed with arguments [MyToken, MTK], not [OtherToken, MTK]"));
    }
}
