use ethers::contract::abigen;

abigen!(
    ProxyAdmin,
    r#"[
        function upgradeAndCall(address proxy, address implementation, bytes data) external
    ]"#
);

abigen!(
    UupsUpgradeable,
    r#"[
        function upgradeToAndCall(address newImplementation, bytes data) external
    ]"#
);
