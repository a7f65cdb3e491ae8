use ethers::utils::to_checksum;

use crate::cli::Command;
use crate::deployment::DeploymentContext;

/// One line description of what a command is about to send
pub fn describe(command: &Command) -> String {
    match command {
        Command::Staking(args) => format!(
            "Deploy ERC20 {} ({}), TokenICO at {} wei per token and StackingDapp",
            args.token_name, args.token_symbol, args.token_price.0
        ),
        Command::NftMarket => "Deploy Lock".to_string(),
        Command::DeployProxy(args) => {
            if args.no_initializer {
                format!("Deploy {} behind a {} proxy", args.contract, args.kind)
            } else {
                format!(
                    "Deploy {} behind a {} proxy, initialized with {}({})",
                    args.contract,
                    args.kind,
                    args.initializer,
                    args.initializer_args.join(", ")
                )
            }
        }
        Command::UpgradeProxy(args) => format!(
            "Upgrade {} proxy {} to {}",
            args.kind,
            to_checksum(&args.proxy, None),
            args.contract
        ),
    }
}

pub fn confirm_deployment(
    context: &DeploymentContext,
    command: &Command,
) -> eyre::Result<bool> {
    println!(
        "Network: {} (chain id {})",
        context.network_name, context.network.chain_id
    );
    println!("Deployer: {}", to_checksum(&context.rpc_signer.address(), None));
    println!("Deployment: {}", context.deployment_dir.display());
    println!("Action: {}", describe(command));

    let proceed = inquire::Confirm::new("Do you want to proceed?")
        .with_default(false)
        .prompt()?;

    Ok(proceed)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Args;

    fn command(args: &[&str]) -> Command {
        let mut argv = vec![
            "deployer",
            "--private-key",
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "--rpc-url",
            "http://localhost:8545",
        ];
        argv.extend_from_slice(args);

        Args::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn describes_staking() {
        assert_eq!(
            describe(&command(&["staking"])),
            "Deploy ERC20 MyToken (MTK), TokenICO at 10000000000000000 wei per token and StackingDapp"
        );
    }

    #[test]
    fn describes_proxy_deployment() {
        assert_eq!(
            describe(&command(&["deploy-proxy"])),
            "Deploy Meinkampf behind a transparent proxy, initialized with store(42)"
        );
        assert_eq!(
            describe(&command(&["deploy-proxy", "--kind", "uups", "--no-initializer"])),
            "Deploy Meinkampf behind a uups proxy"
        );
    }

    #[test]
    fn describes_upgrade() {
        assert_eq!(
            describe(&command(&[
                "upgrade-proxy",
                "--proxy",
                "0x5fbdb2315678afecb367f032d93f642f64180aa3"
            ])),
            "Upgrade transparent proxy 0x5FbDB2315678afecb367f032d93F642f64180aa3 to MeinkampfV2"
        );
    }
}
