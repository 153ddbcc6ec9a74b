//! Deployment settings and the network-keyed router table.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use odra::prelude::Address;
use serde::Deserialize;
use simple_swapper::simple_swapper::is_zero_address;

use crate::error::DeployError;

pub const NETWORK_VAR: &str = "ODRA_CASPER_LIVENET_CHAIN_NAME";
pub const ROUTER_TABLE_VAR: &str = "SWAPPER_ROUTER_TABLE";
pub const GAS_VAR: &str = "SWAPPER_DEPLOY_GAS";
pub const VERIFY_VAR: &str = "VERIFY";

const DEFAULT_ROUTER_TABLE: &str = "resources/router_addresses.json";
// 150 CSPR
const DEFAULT_GAS: u64 = 150_000_000_000;

pub const VERIFY_WARMUP: Duration = Duration::from_secs(60);
pub const VERIFY_ATTEMPTS: u32 = 3;
pub const VERIFY_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
    pub network: String,
    pub router_table: PathBuf,
    pub gas: u64,
    pub verify: bool,
}

impl DeploySettings {
    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DeployError> {
        let network = lookup(NETWORK_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(DeployError::MissingVar(NETWORK_VAR))?;
        let router_table = lookup(ROUTER_TABLE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUTER_TABLE));
        let gas = match lookup(GAS_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| DeployError::InvalidVar {
                name: GAS_VAR,
                value: raw,
            })?,
            None => DEFAULT_GAS,
        };
        let verify = lookup(VERIFY_VAR).is_some_and(|value| value == "true");

        Ok(Self {
            network,
            router_table,
            gas,
            verify,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RouterEntry {
    v2_router: String,
}

/// Router package hashes keyed by chain name, e.g. `casper-test`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RouterTable {
    networks: HashMap<String, RouterEntry>,
}

impl RouterTable {
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let raw = fs::read_to_string(path).map_err(|source| DeployError::ReadRouterTable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, DeployError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn router_for(&self, network: &str) -> Result<Address, DeployError> {
        let entry = self
            .networks
            .get(network)
            .ok_or_else(|| DeployError::UnknownNetwork(network.to_string()))?;
        let router =
            Address::from_str(&entry.v2_router).map_err(|_| DeployError::InvalidRouterAddress {
                network: network.to_string(),
                value: entry.v2_router.clone(),
            })?;
        if is_zero_address(&router) {
            return Err(DeployError::ZeroRouterAddress(network.to_string()));
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER_HASH: &str =
        "hash-1111111111111111111111111111111111111111111111111111111111111111";
    const ZERO_HASH: &str =
        "hash-0000000000000000000000000000000000000000000000000000000000000000";

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn settings_use_defaults() {
        let settings = DeploySettings::from_lookup(lookup(&[(NETWORK_VAR, "casper-test")])).unwrap();

        assert_eq!(
            settings,
            DeploySettings {
                network: "casper-test".to_string(),
                router_table: PathBuf::from(DEFAULT_ROUTER_TABLE),
                gas: DEFAULT_GAS,
                verify: false,
            }
        );
    }

    #[test]
    fn settings_read_overrides() {
        let settings = DeploySettings::from_lookup(lookup(&[
            (NETWORK_VAR, "casper"),
            (ROUTER_TABLE_VAR, "/etc/routers.json"),
            (GAS_VAR, " 200000000000 "),
            (VERIFY_VAR, "true"),
        ]))
        .unwrap();

        assert_eq!(settings.network, "casper");
        assert_eq!(settings.router_table, PathBuf::from("/etc/routers.json"));
        assert_eq!(settings.gas, 200_000_000_000);
        assert!(settings.verify);
    }

    #[test]
    fn verify_needs_exact_true() {
        let settings =
            DeploySettings::from_lookup(lookup(&[(NETWORK_VAR, "casper"), (VERIFY_VAR, "yes")]))
                .unwrap();
        assert!(!settings.verify);
    }

    #[test]
    fn settings_require_network() {
        assert!(matches!(
            DeploySettings::from_lookup(lookup(&[])),
            Err(DeployError::MissingVar(NETWORK_VAR))
        ));
        assert!(matches!(
            DeploySettings::from_lookup(lookup(&[(NETWORK_VAR, "  ")])),
            Err(DeployError::MissingVar(NETWORK_VAR))
        ));
    }

    #[test]
    fn settings_reject_bad_gas() {
        let result =
            DeploySettings::from_lookup(lookup(&[(NETWORK_VAR, "casper"), (GAS_VAR, "lots")]));
        assert!(matches!(
            result,
            Err(DeployError::InvalidVar { name: GAS_VAR, .. })
        ));
    }

    #[test]
    fn table_resolves_router_per_network() {
        let table = RouterTable::parse(&format!(
            r#"{{ "casper-test": {{ "v2_router": "{ROUTER_HASH}" }} }}"#
        ))
        .unwrap();

        let router = table.router_for("casper-test").unwrap();
        assert_eq!(router, Address::from_str(ROUTER_HASH).unwrap());
        assert!(matches!(
            table.router_for("casper"),
            Err(DeployError::UnknownNetwork(network)) if network == "casper"
        ));
    }

    #[test]
    fn table_rejects_bad_addresses() {
        let table = RouterTable::parse(&format!(
            r#"{{ "bad": {{ "v2_router": "not-an-address" }}, "zero": {{ "v2_router": "{ZERO_HASH}" }} }}"#
        ))
        .unwrap();

        assert!(matches!(
            table.router_for("bad"),
            Err(DeployError::InvalidRouterAddress { .. })
        ));
        assert!(matches!(
            table.router_for("zero"),
            Err(DeployError::ZeroRouterAddress(_))
        ));
    }

    #[test]
    fn malformed_table_is_an_error() {
        assert!(matches!(
            RouterTable::parse(r#"{ "casper": { "router": "hash-00" } }"#),
            Err(DeployError::ParseRouterTable(_))
        ));
    }

    #[test]
    fn missing_table_file_is_an_error() {
        assert!(matches!(
            RouterTable::load(Path::new("does/not/exist.json")),
            Err(DeployError::ReadRouterTable { .. })
        ));
    }
}
