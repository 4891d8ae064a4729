use crate::access::Access;
use crate::error::Error;
use crate::events::MintedEvent;
use crate::storage::Storage;
use soroban_sdk::{Address, Env, Symbol};

/// SCZ supply bookkeeping: balances and total supply.
pub struct Supply;

impl Supply {
    /// Mint tokens (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        Access::require_admin(env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        Self::credit(env, to, amount)?;

        env.events().publish(
            (Symbol::new(env, "mint"), to.clone()),
            MintedEvent {
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    /// Increase `to`'s balance and the total supply.
    pub fn credit(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        let new_balance = Storage::get_balance(env, to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let new_supply = Storage::get_total_supply(env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        Storage::set_balance(env, to, new_balance);
        Storage::set_total_supply(env, new_supply);
        Ok(())
    }

    pub fn balance(env: &Env, account: &Address) -> i128 {
        Storage::get_balance(env, account)
    }

    pub fn total_supply(env: &Env) -> i128 {
        Storage::get_total_supply(env)
    }
}
