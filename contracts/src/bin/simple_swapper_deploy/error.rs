use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    InvalidVar { name: &'static str, value: String },

    #[error("cannot read router table {}: {source}", .path.display())]
    ReadRouterTable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed router table: {0}")]
    ParseRouterTable(#[from] serde_json::Error),

    #[error("no router configured for network {0}")]
    UnknownNetwork(String),

    #[error("router address for {network} is not a valid address: {value}")]
    InvalidRouterAddress { network: String, value: String },

    #[error("router address for {0} is the zero address")]
    ZeroRouterAddress(String),

    #[error("deployment not verified after {attempts} attempts: {reason}")]
    Verification { attempts: u32, reason: String },
}
