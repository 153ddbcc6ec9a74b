//! Swaps attached CSPR for a token through an external AMM router.
//!
//! The swapper never holds funds: the whole attached value goes to the router
//! and the router pays the output token straight to the caller.
use odra::casper_event_standard;
use odra::casper_types::{runtime_args, RuntimeArgs, U256, U512};
use odra::prelude::*;
use odra::{CallDef, ContractRef};

use crate::amm_router::AmmRouterContractRef;

/// Deadline handed to the router; swaps execute in the block they land in.
pub const NO_DEADLINE: u64 = u64::MAX;

#[odra::module(events = [SwapExecuted, RouterChanged, OwnershipTransferred], errors = Error)]
pub struct SimpleSwapper {
    owner: Var<Address>,
    uniswap_router: Var<Address>,
}

#[odra::event]
pub struct SwapExecuted {
    pub user: Address,
    pub token: Address,
    pub cspr_amount: U512,
    pub token_amount: U256,
}

#[odra::event]
pub struct RouterChanged {
    pub previous_router: Address,
    pub new_router: Address,
}

#[odra::event]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[odra::odra_error]
pub enum Error {
    InvalidPayment = 1,
    NotOwner = 2,
    InvalidAddress = 3,
    OwnerNotSet = 4,
    RouterNotSet = 5,
    EmptySwapResult = 6,
}

#[odra::module]
impl SimpleSwapper {
    #[odra(init)]
    pub fn init(&mut self, router: Address) {
        if is_zero_address(&router) {
            self.env().revert(Error::InvalidAddress);
        }
        self.owner.set(self.env().caller());
        self.uniswap_router.set(router);
    }

    /// Sells the attached CSPR for `token`, paying the output to the caller.
    ///
    /// `min_amount_out` is enforced by the router; a failed check there
    /// reverts the whole call with the router's own error. Returns the amount
    /// of `token` the caller received.
    #[odra(payable)]
    pub fn swap_cspr_to_token(&mut self, token: Address, min_amount_out: U256) -> U256 {
        let cspr_amount = self.env().attached_value();
        if cspr_amount.is_zero() {
            self.env().revert(Error::InvalidPayment);
        }
        let user = self.env().caller();
        let router = self.uniswap_router();

        let wcspr = AmmRouterContractRef::new(self.env(), router).wcspr();
        // Generated contract refs carry no value, so the payable call is built by hand.
        let args = runtime_args! {
            "amount" => cspr_amount,
            "amount_out_min" => min_amount_out,
            "path" => vec![wcspr, token],
            "to" => user,
            "deadline" => NO_DEADLINE,
        };
        let call = CallDef::new("swap_exact_cspr_for_tokens", true, args).with_amount(cspr_amount);
        let amounts = self.env().call_contract::<Vec<U256>>(router, call);
        let token_amount = match amounts.last() {
            Some(amount) => *amount,
            None => self.env().revert(Error::EmptySwapResult),
        };

        self.env().emit_event(SwapExecuted {
            user,
            token,
            cspr_amount,
            token_amount,
        });
        token_amount
    }

    /// Points the swapper at another router. The new address is not probed;
    /// a wrong one makes later swaps fail.
    pub fn change_uniswap_router_address(&mut self, new_router: Address) {
        self.assert_owner();
        if is_zero_address(&new_router) {
            self.env().revert(Error::InvalidAddress);
        }
        let previous_router = self.uniswap_router();
        self.uniswap_router.set(new_router);
        self.env().emit_event(RouterChanged {
            previous_router,
            new_router,
        });
    }

    /// Hands the owner role to `new_owner` immediately.
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.assert_owner();
        if is_zero_address(&new_owner) {
            self.env().revert(Error::InvalidAddress);
        }
        let previous_owner = self.owner();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(Error::OwnerNotSet)
    }

    pub fn uniswap_router(&self) -> Address {
        self.uniswap_router.get_or_revert_with(Error::RouterNotSet)
    }
}

impl SimpleSwapper {
    fn assert_owner(&self) {
        if self.env().caller() != self.owner() {
            self.env().revert(Error::NotOwner);
        }
    }
}

/// True for the account or contract address with an all-zero hash.
pub fn is_zero_address(address: &Address) -> bool {
    match address {
        Address::Account(account_hash) => account_hash.value() == [0u8; 32],
        Address::Contract(package_hash) => package_hash.value() == [0u8; 32],
    }
}
