use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A contract of the forge project, either by bare name or as `path:Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub path: Option<PathBuf>,
    pub name: String,
}

impl ContractSpec {
    pub fn path_name(path: PathBuf, name: impl ToString) -> Self {
        Self {
            path: Some(path),
            name: name.to_string(),
        }
    }

    pub fn name(name: impl ToString) -> Self {
        Self {
            path: None,
            name: name.to_string(),
        }
    }
}

impl FromStr for ContractSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.rsplit_once(':') {
            Some((path, name)) => Self::path_name(path.into(), name),
            None => Self::name(s),
        })
    }
}

impl fmt::Display for ContractSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path.as_deref() {
            write!(f, "{}:{}", path.display(), self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(ContractSpec::name("Lock").to_string(), "Lock");
        assert_eq!(
            ContractSpec::path_name("src/Lock.sol".into(), "Lock").to_string(),
            "src/Lock.sol:Lock"
        );
    }

    #[test]
    fn parse() {
        let spec: ContractSpec = "Meinkampf".parse().unwrap();
        assert_eq!(spec, ContractSpec::name("Meinkampf"));

        let spec: ContractSpec = "contracts/V2.sol:MeinkampfV2".parse().unwrap();
        assert_eq!(spec.path, Some(PathBuf::from("contracts/V2.sol")));
        assert_eq!(spec.name, "MeinkampfV2");
    }
}
