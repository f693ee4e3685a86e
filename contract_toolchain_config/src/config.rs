use crate::{
    credentials::SigningCredential,
    env::{EnvSource, ProcessEnv},
    types::{
        GasPrice, KnownNetwork, NetworkConfig, SolidityConfig, ToolchainConfig, TypechainConfig,
    },
};

pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";
pub const GENERIC_CHAIN_ID_ENV_VAR: &str = "GENERIC_CHAIN_ID";
pub const GENERIC_GAS_PRICE_ENV_VAR: &str = "GENERIC_GAS_PRICE";

const DEFAULT_CHAIN_ID: u64 = 0;

impl ToolchainConfig {
    /// load `.env` (if there is one) on top of the process env, then assemble
    pub fn load() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded env file {}", path.display());
        }

        Self::from_env(&ProcessEnv)
    }

    /// Assemble the config from `env`. Never fails: every variable has a default.
    pub fn from_env<E: EnvSource + ?Sized>(env: &E) -> Self {
        // one optional key shared by every network
        let accounts: Vec<SigningCredential> = env
            .var(PRIVATE_KEY_ENV_VAR)
            .map(SigningCredential::new)
            .into_iter()
            .collect();
        log::debug!(
            "{PRIVATE_KEY_ENV_VAR} is {}",
            if accounts.is_empty() { "unset" } else { "set" }
        );

        let networks = KnownNetwork::ALL
            .into_iter()
            .map(|network| {
                let url_var = network.url_env_var();
                let url = env.var(url_var).unwrap_or_else(|| {
                    log::debug!("{url_var} is unset, leaving {network} url empty");
                    String::new()
                });

                let mut config = NetworkConfig {
                    url,
                    accounts: accounts.clone(),
                    ..Default::default()
                };

                if network == KnownNetwork::Generic {
                    config.chain_id = Some(parse_chain_id(env.var(GENERIC_CHAIN_ID_ENV_VAR)));
                    config.gas_price = Some(parse_gas_price(env.var(GENERIC_GAS_PRICE_ENV_VAR)));
                }

                (network, config)
            })
            .collect();

        Self {
            solidity: SolidityConfig::default(),
            typechain: TypechainConfig::default(),
            networks,
        }
    }
}

fn parse_chain_id(raw: Option<String>) -> u64 {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return DEFAULT_CHAIN_ID;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!(
            "{GENERIC_CHAIN_ID_ENV_VAR}={raw:?} is not a chain id, using {DEFAULT_CHAIN_ID}"
        );
        DEFAULT_CHAIN_ID
    })
}

/// unset or empty means "auto", same as an unparsable value
fn parse_gas_price(raw: Option<String>) -> GasPrice {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return GasPrice::Auto;
    };

    match raw.trim().parse() {
        Ok(wei) => GasPrice::Fixed(wei),
        Err(_) => {
            log::warn!("{GENERIC_GAS_PRICE_ENV_VAR}={raw:?} is not an integer, using auto");
            GasPrice::Auto
        }
    }
}
