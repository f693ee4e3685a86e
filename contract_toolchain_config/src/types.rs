use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::credentials::SigningCredential;

pub const SOLC_VERSION: &str = "0.8.16";
pub const OPTIMIZER_RUNS: u32 = 200;
pub const TYPECHAIN_OUT_DIR: &str = "typechain";
pub const TYPECHAIN_TARGET: &str = "ethers-v5";

const AUTO_GAS_PRICE: &str = "auto";

/// The full build/network configuration handed to the contract toolchain.
///
/// Serializes into the toolchain's user config shape (`solidity`, `typechain`,
/// `networks`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    pub solidity: SolidityConfig,
    pub typechain: TypechainConfig,
    pub networks: BTreeMap<KnownNetwork, NetworkConfig>,
}

impl ToolchainConfig {
    pub fn network(&self, network: KnownNetwork) -> Option<&NetworkConfig> {
        self.networks.get(&network)
    }

    /// Copy of this config that is safe to print: every credential is swapped
    /// for a placeholder.
    pub fn redacted(&self) -> Self {
        Self {
            solidity: self.solidity.clone(),
            typechain: self.typechain.clone(),
            networks: self
                .networks
                .iter()
                .map(|(name, network)| (*name, network.redacted()))
                .collect(),
        }
    }

    /// Export including credentials, for handing over to the toolchain.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidityConfig {
    pub compilers: Vec<CompilerProfile>,
}

impl Default for SolidityConfig {
    fn default() -> Self {
        Self {
            compilers: vec![CompilerProfile::default()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerProfile {
    pub version: String,
    pub settings: CompilerSettings,
}

impl Default for CompilerProfile {
    fn default() -> Self {
        Self {
            version: SOLC_VERSION.to_owned(),
            settings: CompilerSettings::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub optimizer: OptimizerSettings,
}

/// `runs` trades deployment size against call cost in the downstream compiler;
/// it is only passed through here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: OPTIMIZER_RUNS,
        }
    }
}

/// Where (and in which flavor) contract type bindings get generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypechainConfig {
    pub out_dir: String,
    pub target: String,
}

impl TypechainConfig {
    pub fn out_path(&self, project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(&self.out_dir)
    }
}

impl Default for TypechainConfig {
    fn default() -> Self {
        Self {
            out_dir: TYPECHAIN_OUT_DIR.to_owned(),
            target: TYPECHAIN_TARGET.to_owned(),
        }
    }
}

/// Connection parameters for one named network.
///
/// An empty `url` means the endpoint was not provided.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<GasPrice>,
    #[serde(default)]
    pub accounts: Vec<SigningCredential>,
}

impl NetworkConfig {
    pub fn redacted(&self) -> Self {
        Self {
            accounts: self
                .accounts
                .iter()
                .map(|_| SigningCredential::redacted())
                .collect(),
            ..self.clone()
        }
    }
}

/// Gas price policy: let the node decide, or a fixed price in wei.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GasPrice {
    #[default]
    Auto,
    Fixed(u64),
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO_GAS_PRICE),
            Self::Fixed(wei) => write!(f, "{wei}"),
        }
    }
}

impl Serialize for GasPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str(AUTO_GAS_PRICE),
            Self::Fixed(wei) => serializer.serialize_u64(*wei),
        }
    }
}

impl<'de> Deserialize<'de> for GasPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Wei(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Wei(wei) => Ok(Self::Fixed(wei)),
            Repr::Text(text) if text == AUTO_GAS_PRICE => Ok(Self::Auto),
            Repr::Text(text) => Err(de::Error::custom(format!(
                "invalid gas price `{text}`, expected \"auto\" or an integer"
            ))),
        }
    }
}

/// The fixed set of networks the toolchain is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownNetwork {
    Ethereum,
    Goerli,
    Polygon,
    Mumbai,
    Generic,
}

impl KnownNetwork {
    pub const ALL: [KnownNetwork; 5] = [
        Self::Ethereum,
        Self::Goerli,
        Self::Polygon,
        Self::Mumbai,
        Self::Generic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Goerli => "goerli",
            Self::Polygon => "polygon",
            Self::Mumbai => "mumbai",
            Self::Generic => "generic",
        }
    }

    /// env var holding this network's RPC url
    pub fn url_env_var(&self) -> &'static str {
        match self {
            Self::Ethereum => "ETHEREUM_URL",
            Self::Goerli => "GOERLI_URL",
            Self::Polygon => "POLYGON_URL",
            Self::Mumbai => "MUMBAI_URL",
            Self::Generic => "GENERIC_URL",
        }
    }
}

impl fmt::Display for KnownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KnownNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(KnownNetwork::name).collect();
                format!("unknown network `{s}`, expected one of: {}", known.join(", "))
            })
    }
}
