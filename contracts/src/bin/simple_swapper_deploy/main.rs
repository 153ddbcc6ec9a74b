//! Deploys `SimpleSwapper` to a Casper network and optionally verifies the
//! stored state.
//!
//! Node, chain and signing key come from the `ODRA_CASPER_LIVENET_*`
//! variables read by the livenet environment; see `.env.example`.
mod config;
mod error;
mod retry;

use std::process::ExitCode;
use std::thread;

use log::{error, info};
use odra::host::{Deployer, HostRef};
use odra::prelude::Address;
use simple_swapper::simple_swapper::{SimpleSwapper, SimpleSwapperHostRef, SimpleSwapperInitArgs};

use config::{DeploySettings, RouterTable, VERIFY_ATTEMPTS, VERIFY_BACKOFF, VERIFY_WARMUP};
use error::DeployError;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Deployment failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DeployError> {
    let settings = DeploySettings::from_env()?;
    let router = RouterTable::load(&settings.router_table)?.router_for(&settings.network)?;
    info!(
        "Deploying SimpleSwapper on {} with router {:?}",
        settings.network, router
    );

    let env = odra_casper_livenet_env::env();
    let deployer = env.caller();
    env.set_gas(settings.gas);
    let swapper = SimpleSwapper::deploy(&env, SimpleSwapperInitArgs { router });
    info!(
        "SimpleSwapper deployed to {:?} by {:?}",
        swapper.address(),
        deployer
    );

    if !settings.verify {
        info!("Skipping deployment verification (VERIFY not set to true)");
        return Ok(());
    }

    info!(
        "Waiting {}s before verifying the deployment",
        VERIFY_WARMUP.as_secs()
    );
    thread::sleep(VERIFY_WARMUP);
    retry::with_fixed_backoff(VERIFY_ATTEMPTS, VERIFY_BACKOFF, |attempt| {
        info!("Verification attempt {attempt} for SimpleSwapper");
        verify_deployment(&swapper, router, deployer)
    })
    .map_err(|reason| DeployError::Verification {
        attempts: VERIFY_ATTEMPTS,
        reason,
    })?;
    info!("SimpleSwapper state verified");
    Ok(())
}

/// Reads back the router and owner the swapper was initialized with.
fn verify_deployment(
    swapper: &SimpleSwapperHostRef,
    router: Address,
    owner: Address,
) -> Result<(), String> {
    let stored_router = swapper
        .try_uniswap_router()
        .map_err(|err| format!("cannot read router: {err:?}"))?;
    if stored_router != router {
        return Err(format!("router is {stored_router:?}, expected {router:?}"));
    }
    let stored_owner = swapper
        .try_owner()
        .map_err(|err| format!("cannot read owner: {err:?}"))?;
    if stored_owner != owner {
        return Err(format!("owner is {stored_owner:?}, expected {owner:?}"));
    }
    Ok(())
}
