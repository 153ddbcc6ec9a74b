//! Interface of the AMM router the swapper forwards native payments to.
use odra::casper_types::U256;
use odra::prelude::*;

#[odra::external_contract]
pub trait AmmRouter {
    /// Wrapped CSPR token, the first hop of every native swap path.
    fn wcspr(&self) -> Address;

    /// Swaps the attached CSPR along `path` and sends the output token to `to`.
    ///
    /// Reverts when the output would fall below `amount_out_min` or the block
    /// time is past `deadline`. Returns the amounts along the path; the last
    /// element is what `to` received.
    fn swap_exact_cspr_for_tokens(
        &mut self,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<U256>;
}
