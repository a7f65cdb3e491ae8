use std::fmt;
use std::str::FromStr;

use ethers::prelude::k256::SecretKey;
use ethers::signers::LocalWallet;

/// A deployer's signing key
///
/// The regular `Display` output is redacted, use the alternate form (`{:#}`)
/// to get the full `0x` prefixed hex encoding.
#[derive(Clone)]
pub struct PrivateKey {
    pub key: SecretKey,
}

impl PrivateKey {
    pub fn wallet(&self) -> LocalWallet {
        LocalWallet::from(self.key.clone())
    }
}

impl FromStr for PrivateKey {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches("0x");

        let bytes = hex::decode(s)?;

        let key = SecretKey::from_slice(&bytes)?;

        Ok(Self { key })
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded = hex::encode(self.key.to_bytes());

        if f.alternate() {
            write!(f, "0x{encoded}")
        } else {
            write!(f, "0x****{}", &encoded[encoded.len() - 4..])
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.to_string()).finish()
    }
}

#[cfg(test)]
mod tests {
    use ethers::signers::Signer;

    use super::*;

    const KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn parses_with_and_without_prefix() {
        let plain: PrivateKey = KEY.parse().unwrap();
        let prefixed: PrivateKey = format!("0x{KEY}").parse().unwrap();

        assert_eq!(plain.key.to_bytes(), prefixed.key.to_bytes());
    }

    #[test]
    fn derives_wallet_address() {
        let key: PrivateKey = KEY.parse().unwrap();

        assert_eq!(
            format!("{:?}", key.wallet().address()),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn display_is_redacted() {
        let key: PrivateKey = KEY.parse().unwrap();

        assert_eq!(key.to_string(), "0x****ff80");
        assert_eq!(format!("{key:?}"), "PrivateKey(\"0x****ff80\")");
        assert_eq!(format!("{key:#}"), format!("0x{KEY}"));
    }

    #[test]
    fn rejects_invalid_keys() {
        assert!("0xzz".parse::<PrivateKey>().is_err());
        assert!("00".repeat(32).parse::<PrivateKey>().is_err());
        assert!("abcd".parse::<PrivateKey>().is_err());
    }
}
