use std::{error::Error, sync::Arc};

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{LocalWallet, Signer},
    types::U256,
};

use crate::types::{GasPrice, NetworkConfig};

pub type BoxError = Box<dyn Error + Send + Sync>;

pub type EtherSigner = SignerMiddleware<Provider<Http>, LocalWallet>;

impl NetworkConfig {
    pub fn provider(&self) -> Result<Provider<Http>, BoxError> {
        if self.url.is_empty() {
            return Err("network url is not set".into());
        }

        Ok(Provider::<Http>::try_from(self.url.as_str())?)
    }

    /// Wallet for the first signing credential, if the network has one.
    ///
    /// A chain id of `0` is treated as "not pinned" and leaves the wallet's default.
    pub fn wallet(&self) -> Result<Option<LocalWallet>, BoxError> {
        let Some(credential) = self.accounts.first() else {
            return Ok(None);
        };

        // parse errors from ethers don't echo the input
        let wallet: LocalWallet = credential.expose_secret().parse()?;

        Ok(Some(match self.chain_id {
            Some(chain_id) if chain_id != 0 => wallet.with_chain_id(chain_id),
            _ => wallet,
        }))
    }

    pub fn signer_client(&self) -> Result<Arc<EtherSigner>, BoxError> {
        let provider = self.provider()?;
        let wallet = self.wallet()?.ok_or("network has no signing credential")?;

        Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
    }
}

impl GasPrice {
    /// `None` leaves pricing to the node
    pub fn as_wei(&self) -> Option<U256> {
        match self {
            Self::Auto => None,
            Self::Fixed(wei) => Some(U256::from(*wei)),
        }
    }
}

#[cfg(test)]
mod tests {
    use ethers::types::Address;

    use crate::credentials::SigningCredential;

    use super::*;

    // first default account of a local dev node
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn network(url: &str, chain_id: Option<u64>, accounts: &[&str]) -> NetworkConfig {
        NetworkConfig {
            url: url.to_owned(),
            chain_id,
            gas_price: None,
            accounts: accounts.iter().map(|key| SigningCredential::new(*key)).collect(),
        }
    }

    #[test]
    fn test_provider_requires_url() {
        let err = network("", None, &[]).provider().unwrap_err();
        assert_eq!(err.to_string(), "network url is not set");

        assert!(network("not a url", None, &[]).provider().is_err());
        assert!(network("http://localhost:8545", None, &[]).provider().is_ok());
    }

    #[test]
    fn test_wallet_from_credential() {
        let wallet = network("", Some(137), &[DEV_KEY]).wallet().unwrap().unwrap();

        assert_eq!(wallet.address(), DEV_ADDRESS.parse::<Address>().unwrap());
        assert_eq!(wallet.chain_id(), 137);
    }

    #[test]
    fn test_wallet_keeps_default_chain_when_unpinned() {
        let default_chain = DEV_KEY.parse::<LocalWallet>().unwrap().chain_id();
        let wallet = network("", Some(0), &[DEV_KEY]).wallet().unwrap().unwrap();

        assert_eq!(wallet.chain_id(), default_chain);
    }

    #[test]
    fn test_wallet_without_credentials() {
        assert!(network("", None, &[]).wallet().unwrap().is_none());
    }

    #[test]
    fn test_invalid_credential_is_not_echoed() {
        let err = network("", None, &["0xnothex"]).wallet().unwrap_err();
        assert!(!err.to_string().contains("nothex"));
    }

    #[test]
    fn test_signer_client_needs_credential() {
        let err = network("http://localhost:8545", None, &[])
            .signer_client()
            .unwrap_err();
        assert_eq!(err.to_string(), "network has no signing credential");

        let client = network("http://localhost:8545", Some(31337), &[DEV_KEY])
            .signer_client()
            .unwrap();
        assert_eq!(client.address(), DEV_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_gas_price_as_wei() {
        assert_eq!(GasPrice::Auto.as_wei(), None);
        assert_eq!(GasPrice::Fixed(50).as_wei(), Some(U256::from(50u64)));
    }
}
