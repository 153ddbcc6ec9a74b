//! Constant-product router with a Uniswap V2 style native swap entry point.
//!
//! Each output token has one pool against wrapped CSPR. Quotes use the V2
//! formula with a 0.3% fee:
//!
//! `amount_out = amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)`
//!
//! Only `[wcspr, token]` paths are supported.
use odra::casper_event_standard;
use odra::casper_types::{U256, U512};
use odra::prelude::*;
use odra::ContractRef;

use crate::mock_token::MockTokenContractRef;

const FEE_NUMERATOR: u32 = 997;
const FEE_DENOMINATOR: u32 = 1_000;

#[odra::module(events = [Swap], errors = Error)]
pub struct MockRouter {
    wcspr: Var<Address>,
    pools: Mapping<Address, Pool>,
}

#[odra::odra_type]
pub struct Pool {
    pub cspr_reserve: U256,
    pub token_reserve: U256,
}

#[odra::event]
pub struct Swap {
    pub sender: Address,
    pub token: Address,
    pub amount_in: U256,
    pub amount_out: U256,
    pub to: Address,
}

#[odra::odra_error]
pub enum Error {
    InsufficientOutputAmount = 100,
    Expired = 101,
    InvalidPath = 102,
    InsufficientLiquidity = 103,
    InsufficientInputAmount = 104,
    AmountOverflow = 105,
    WcsprNotSet = 106,
}

#[odra::module]
impl MockRouter {
    #[odra(init)]
    pub fn init(&mut self, wcspr: Address) {
        self.wcspr.set(wcspr);
    }

    pub fn wcspr(&self) -> Address {
        self.wcspr.get_or_revert_with(Error::WcsprNotSet)
    }

    /// Adds the attached CSPR and `token_amount` to the pool of `token`.
    ///
    /// The tokens must already sit in the router's balance.
    #[odra(payable)]
    pub fn add_liquidity(&mut self, token: Address, token_amount: U256) {
        let cspr_amount = self.motes_to_u256(self.env().attached_value());
        let mut pool = self.pool(token);
        pool.cspr_reserve += cspr_amount;
        pool.token_reserve += token_amount;
        self.pools.set(&token, pool);
    }

    pub fn pool(&self, token: Address) -> Pool {
        self.pools.get(&token).unwrap_or(Pool {
            cspr_reserve: U256::zero(),
            token_reserve: U256::zero(),
        })
    }

    pub fn get_amounts_out(&self, amount_in: U256, path: Vec<Address>) -> Vec<U256> {
        let token = self.output_token(&path);
        let pool = self.pool(token);
        let amount_out = self.amount_out(amount_in, pool.cspr_reserve, pool.token_reserve);
        vec![amount_in, amount_out]
    }

    #[odra(payable)]
    pub fn swap_exact_cspr_for_tokens(
        &mut self,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<U256> {
        if deadline < self.env().get_block_time() {
            self.env().revert(Error::Expired);
        }
        let token = self.output_token(&path);
        let amount_in = self.motes_to_u256(self.env().attached_value());
        let mut pool = self.pool(token);
        let amount_out = self.amount_out(amount_in, pool.cspr_reserve, pool.token_reserve);
        if amount_out < amount_out_min {
            self.env().revert(Error::InsufficientOutputAmount);
        }

        pool.cspr_reserve += amount_in;
        pool.token_reserve -= amount_out;
        self.pools.set(&token, pool);

        MockTokenContractRef::new(self.env(), token).transfer(&to, &amount_out);

        self.env().emit_event(Swap {
            sender: self.env().caller(),
            token,
            amount_in,
            amount_out,
            to,
        });
        vec![amount_in, amount_out]
    }
}

impl MockRouter {
    fn output_token(&self, path: &[Address]) -> Address {
        match path {
            [first, token] if *first == self.wcspr() => *token,
            _ => self.env().revert(Error::InvalidPath),
        }
    }

    fn amount_out(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> U256 {
        if amount_in.is_zero() {
            self.env().revert(Error::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            self.env().revert(Error::InsufficientLiquidity);
        }
        let amount_in_with_fee = amount_in * U256::from(FEE_NUMERATOR);
        let numerator = amount_in_with_fee * reserve_out;
        let denominator = reserve_in * U256::from(FEE_DENOMINATOR) + amount_in_with_fee;
        numerator / denominator
    }

    fn motes_to_u256(&self, motes: U512) -> U256 {
        if motes > U512::from(u128::MAX) {
            self.env().revert(Error::AmountOverflow);
        }
        U256::from(motes.as_u128())
    }
}
