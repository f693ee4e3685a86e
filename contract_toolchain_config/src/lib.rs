//! Build and network configuration for the contract toolchain, assembled from
//! environment variables.

pub mod config;
pub mod credentials;
pub mod env;
pub mod ethers_client;
pub mod types;
