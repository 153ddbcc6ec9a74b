//! Bare fungible token used as the swap output in tests and local setups.
use odra::casper_types::U256;
use odra::prelude::*;

#[odra::module(errors = Error)]
pub struct MockToken {
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
}

#[odra::odra_error]
pub enum Error {
    InsufficientBalance = 200,
}

#[odra::module]
impl MockToken {
    /// Unrestricted mint; anyone can fund any account.
    pub fn mint(&mut self, to: &Address, amount: &U256) {
        let balance = self.balances.get_or_default(to);
        self.balances.set(to, balance + *amount);
        self.total_supply.set(self.total_supply() + *amount);
    }

    pub fn transfer(&mut self, recipient: &Address, amount: &U256) {
        let sender = self.env().caller();
        let sender_balance = self.balances.get_or_default(&sender);
        if sender_balance < *amount {
            self.env().revert(Error::InsufficientBalance);
        }
        self.balances.set(&sender, sender_balance - *amount);
        let recipient_balance = self.balances.get_or_default(recipient);
        self.balances.set(recipient, recipient_balance + *amount);
    }

    pub fn balance_of(&self, owner: &Address) -> U256 {
        self.balances.get_or_default(owner)
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, NoArgs};

    #[test]
    fn mint_and_transfer() {
        let env = odra_test::env();
        let alice = env.get_account(0);
        let bob = env.get_account(1);
        let mut token = MockToken::deploy(&env, NoArgs);

        token.mint(&alice, &U256::from(1_000));
        token.transfer(&bob, &U256::from(400));

        assert_eq!(token.balance_of(&alice), U256::from(600));
        assert_eq!(token.balance_of(&bob), U256::from(400));
        assert_eq!(token.total_supply(), U256::from(1_000));
    }

    #[test]
    fn transfer_above_balance_reverts() {
        let env = odra_test::env();
        let alice = env.get_account(0);
        let bob = env.get_account(1);
        let mut token = MockToken::deploy(&env, NoArgs);
        token.mint(&alice, &U256::from(10));

        assert_eq!(
            token.try_transfer(&bob, &U256::from(11)),
            Err(Error::InsufficientBalance.into())
        );
        assert_eq!(token.balance_of(&alice), U256::from(10));
        assert_eq!(token.balance_of(&bob), U256::zero());
    }
}
